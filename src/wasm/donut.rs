use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use super::dom::{by_id, SVG_NS};
use crate::config::SiteConfig;
use crate::donut::{layout, DonutEntry, CENTER, HOLE_FILL, HOLE_RADIUS, RADIUS, STROKE_WIDTH};

/// Renders the token split into `#donutChart` and its legend. Returns false
/// when the chart is not on this page.
pub fn render(document: &Document, config: &SiteConfig, entries: &[DonutEntry]) -> Result<bool, JsValue> {
    let Some(svg) = by_id::<Element>(document, &config.ids.donut) else {
        return Ok(false);
    };
    let ring = svg.query_selector("g")?.unwrap_or_else(|| svg.clone());
    let legend = by_id::<Element>(document, &config.ids.donut_legend);
    let donut = layout(entries, RADIUS);
    let center = CENTER.to_string();

    for segment in &donut.segments {
        let circle = circle(document, &center, RADIUS)?;
        circle.set_attribute("fill", "none")?;
        circle.set_attribute("stroke", segment.color)?;
        circle.set_attribute("stroke-width", &STROKE_WIDTH.to_string())?;
        circle.set_attribute("stroke-dasharray", &segment.dash_array(donut.circumference))?;
        circle.set_attribute("stroke-dashoffset", &segment.dash_offset.to_string())?;
        circle.set_attribute("pathLength", &donut.circumference.to_string())?;
        circle.set_attribute("stroke-linecap", "butt")?;
        circle.set_attribute("transform", &format!("rotate(0 {center} {center})"))?;
        ring.append_child(&circle)?;
    }

    if let Some(legend) = legend {
        for item in &donut.legend {
            let li = document.create_element("li")?;
            let swatch = document.create_element("span")?.dyn_into::<HtmlElement>()?;
            swatch.set_class_name("swatch");
            swatch.style().set_property("background", item.color)?;
            li.append_child(&swatch)?;
            li.append_child(&document.create_text_node(&item.text))?;
            legend.append_child(&li)?;
        }
    }

    let hole = circle(document, &center, HOLE_RADIUS)?;
    hole.set_attribute("fill", HOLE_FILL)?;
    svg.append_child(&hole)?;
    Ok(true)
}

fn circle(document: &Document, center: &str, radius: f64) -> Result<Element, JsValue> {
    let circle = document.create_element_ns(Some(SVG_NS), "circle")?;
    circle.set_attribute("cx", center)?;
    circle.set_attribute("cy", center)?;
    circle.set_attribute("r", &radius.to_string())?;
    Ok(circle)
}

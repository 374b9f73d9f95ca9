use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, File, HtmlAnchorElement, HtmlCanvasElement,
    HtmlImageElement, HtmlInputElement, NodeList, ScrollBehavior, ScrollIntoViewOptions, Url,
};

use crate::draw::{Bitmap, Rect, Size, Surface, TextStyle};

pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Element with `id`, if present and of the expected type.
pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn smooth_scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Client-side download through a detached `<a download>`.
pub(crate) fn trigger_download(document: &Document, href: &str, filename: &str) -> Result<(), JsValue> {
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(href);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}

pub(crate) fn first_file(input: &HtmlInputElement) -> Option<File> {
    input.files().and_then(|files| files.get(0))
}

/// Decodes an uploaded file into an image element. The object URL is
/// revoked whether or not the browser can decode the file.
pub async fn decode_file(file: &File) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    let url = Url::create_object_url_with_blob(file)?;
    image.set_src(&url);
    let decoded = JsFuture::from(image.decode()).await;
    Url::revoke_object_url(&url)?;
    decoded?;
    Ok(image)
}

impl Bitmap for HtmlImageElement {
    fn natural_size(&self) -> Size {
        Size::new(self.natural_width() as f64, self.natural_height() as f64)
    }
}

pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d canvas context unavailable")?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    pub(crate) fn to_png_url(&self) -> Result<String, JsValue> {
        self.canvas.to_data_url_with_type("image/png")
    }
}

#[allow(deprecated)]
impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_rect(&mut self, color: &str, rect: Rect) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn outlined_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style(&JsValue::from_str(style.fill));
        self.ctx.set_line_width(style.line_width);
        self.ctx.set_stroke_style(&JsValue::from_str(style.stroke));
        let _ = self.ctx.stroke_text(text, x, y);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, rect: Rect) {
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
        );
    }
}

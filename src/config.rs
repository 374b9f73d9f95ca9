//! Element ids, asset paths and fixed constants the widgets look for in the
//! host page. Everything tunable lives here so tests can install widgets
//! against their own fixtures.

/// Ids of the elements each widget binds to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementIds {
    pub copy_button: String,
    pub policy_input: String,
    pub banner_canvas: String,
    pub banner_background: String,
    pub banner_headline: String,
    pub banner_image: String,
    pub banner_export: String,
    pub layers_canvas: String,
    pub layers_export: String,
    /// Attribute carrying the slot index on each layer file input.
    pub layer_slot_attr: String,
    pub pick_banner: String,
    pub pick_layers: String,
    pub studio_section: String,
    pub banner_panel: String,
    pub layers_panel: String,
    pub donut: String,
    pub donut_legend: String,
    pub hamburger: String,
    pub mobile_menu: String,
    pub gallery: String,
    pub gallery_prev: String,
    pub gallery_next: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            copy_button: "copyPolicy".into(),
            policy_input: "policyId".into(),
            banner_canvas: "bannerCanvas".into(),
            banner_background: "bgColor".into(),
            banner_headline: "headlineText".into(),
            banner_image: "bannerImage".into(),
            banner_export: "exportBanner".into(),
            layers_canvas: "zillaCanvas".into(),
            layers_export: "exportZilla".into(),
            layer_slot_attr: "data-layer".into(),
            pick_banner: "pickBanner".into(),
            pick_layers: "pickZilla".into(),
            studio_section: "studioSection".into(),
            banner_panel: "panelBanner".into(),
            layers_panel: "panelZilla".into(),
            donut: "donutChart".into(),
            donut_legend: "nomicsLegend".into(),
            hamburger: "hamburger".into(),
            mobile_menu: "mobileMenu".into(),
            gallery: "memeGallery".into(),
            gallery_prev: "galleryPrev".into(),
            gallery_next: "galleryNext".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    pub manifest_url: String,
    /// Directory prefix joined with every manifest entry.
    pub base_path: String,
    /// Leading entries resolved without waiting for intersection.
    pub eager_count: usize,
    pub root_margin: String,
    pub threshold: f64,
    pub fallback_step: f64,
    pub fallback_gap: f64,
    pub fallback: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            manifest_url: "public/memes/manifest.json".into(),
            base_path: "public/memes/".into(),
            eager_count: 4,
            root_margin: "200px 0px".into(),
            threshold: 0.01,
            fallback_step: 260.0,
            fallback_gap: 16.0,
            fallback: crate::gallery::FALLBACK_SOURCES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub ids: ElementIds,
    pub gallery: GalleryConfig,
    pub banner_filename: String,
    pub layers_filename: String,
    pub copied_label: String,
    pub copy_label: String,
    pub copy_reset_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            gallery: GalleryConfig::default(),
            banner_filename: "zilla-banner.png".into(),
            layers_filename: "my-zilla.png".into(),
            copied_label: "Copied!".into(),
            copy_label: "Copy".into(),
            copy_reset_ms: 1200,
        }
    }
}

//! Meme gallery: source list, per-image source resolution and carousel math.

use std::collections::HashSet;

use crate::config::GalleryConfig;

pub const FALLBACK_SOURCES: &[&str] = &[
    "zillamascot.png",
    "zillaVSbears.png",
    "zillameme1.png",
    "zillameme2.png",
    "zillameme3.png",
    "zillameme4.png",
    "zillameme5.png",
    "zillameme6.png",
    "zillameme7.png",
];

pub const PLACEHOLDER_SRC: &str =
    "data:image/svg+xml;utf8,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"20\" height=\"20\"/>";

pub const ITEM_CLASS: &str = "gallery__item";
pub const IMAGE_ALT: &str = "ZILLA meme";

/// Drops empty names and repeats, keeping first-occurrence order.
pub fn unique_sources<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            if name.is_empty() || !seen.insert(name.to_string()) {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

/// Turns a manifest response into the list to render. Anything other than
/// a 2xx JSON array yields the fallback list.
pub fn manifest_sources(status: u16, body: Option<&str>, fallback: &[String]) -> Vec<String> {
    let parsed = (200..300)
        .contains(&status)
        .then_some(body)
        .flatten()
        .and_then(|body| serde_json::from_str::<serde_json::Value>(body).ok());
    match parsed {
        Some(serde_json::Value::Array(items)) => {
            unique_sources(items.iter().filter_map(serde_json::Value::as_str))
        }
        _ => unique_sources(fallback),
    }
}

/// Swaps a trailing `.png`, `.jpg` or `.jpeg` (any case) for `.webp`.
/// Other paths are returned unchanged.
pub fn webp_variant(path: &str) -> String {
    let lower = path.to_ascii_lowercase();
    for ext in [".png", ".jpg", ".jpeg"] {
        if lower.ends_with(ext) {
            return format!("{}.webp", &path[..path.len() - ext.len()]);
        }
    }
    path.to_string()
}

/// Final path segment, used as the download file name.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePaths {
    pub original: String,
    pub webp: String,
}

impl ImagePaths {
    pub fn new(base: &str, name: &str) -> Self {
        let original = format!("{base}{name}");
        let webp = webp_variant(&original);
        Self { original, webp }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loading {
    Eager,
    Lazy,
}

impl Loading {
    pub fn for_index(index: usize, eager_count: usize) -> Self {
        if index < eager_count {
            Loading::Eager
        } else {
            Loading::Lazy
        }
    }

    pub fn attr(self) -> &'static str {
        match self {
            Loading::Eager => "eager",
            Loading::Lazy => "lazy",
        }
    }

    pub fn fetch_priority(self) -> &'static str {
        match self {
            Loading::Eager => "high",
            Loading::Lazy => "low",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadCheck {
    Found,
    Missing,
    Failed,
}

impl HeadCheck {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            HeadCheck::Found
        } else {
            HeadCheck::Missing
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageState {
    Placeholder,
    Observed,
    Resolved(String),
    Loaded(String),
}

/// Lifecycle of one gallery image, from placeholder to decoded source.
#[derive(Clone, Debug)]
pub struct GalleryImage {
    pub paths: ImagePaths,
    pub loading: Loading,
    state: ImageState,
}

impl GalleryImage {
    pub fn new(paths: ImagePaths, loading: Loading) -> Self {
        Self {
            paths,
            loading,
            state: ImageState::Placeholder,
        }
    }

    pub fn state(&self) -> &ImageState {
        &self.state
    }

    /// Marks the image as waiting on its WebP check. Only the first call
    /// returns true, so each image is checked once.
    pub fn observe(&mut self) -> bool {
        if self.state != ImageState::Placeholder {
            return false;
        }
        self.state = ImageState::Observed;
        true
    }

    /// Picks the source for a finished WebP check and returns it for assignment.
    pub fn resolve(&mut self, check: HeadCheck) -> String {
        let src = match check {
            HeadCheck::Found => self.paths.webp.clone(),
            HeadCheck::Missing | HeadCheck::Failed => self.paths.original.clone(),
        };
        self.state = ImageState::Resolved(src.clone());
        src
    }

    pub fn mark_loaded(&mut self) {
        if let ImageState::Resolved(src) = &self.state {
            self.state = ImageState::Loaded(src.clone());
        }
    }

    /// Href and file name for click-to-save; `None` while still a placeholder.
    pub fn download(&self) -> Option<(String, String)> {
        match self.state {
            ImageState::Resolved(_) | ImageState::Loaded(_) => Some((
                self.paths.original.clone(),
                file_name(&self.paths.original).to_string(),
            )),
            ImageState::Placeholder | ImageState::Observed => None,
        }
    }
}

pub fn build_images(sources: &[String], config: &GalleryConfig) -> Vec<GalleryImage> {
    let eager = config.eager_count.min(sources.len());
    sources
        .iter()
        .enumerate()
        .map(|(index, name)| {
            GalleryImage::new(
                ImagePaths::new(&config.base_path, name),
                Loading::for_index(index, eager),
            )
        })
        .collect()
}

/// Mirrors `parseInt`: leading digits only.
fn leading_int(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().map(f64::from)
}

/// Horizontal scroll distance for one carousel click.
pub fn carousel_step(first_item_width: Option<f64>, gap: &str, config: &GalleryConfig) -> f64 {
    let gap = leading_int(gap).filter(|gap| *gap > 0.0).unwrap_or(config.fallback_gap);
    match first_item_width {
        Some(width) => width + gap,
        None => config.fallback_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Vec<String> {
        GalleryConfig::default().fallback
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let unique = unique_sources(["b.png", "a.png", "", "b.png", "c.png", "a.png"]);
        assert_eq!(unique, vec!["b.png", "a.png", "c.png"]);
    }

    #[test]
    fn not_found_manifest_uses_fallback_in_order() {
        let sources = manifest_sources(404, Some("[\"x.png\"]"), &fallback());
        assert_eq!(sources, FALLBACK_SOURCES);
    }

    #[test]
    fn broken_or_non_array_manifest_uses_fallback() {
        assert_eq!(manifest_sources(200, Some("{not json"), &fallback()), FALLBACK_SOURCES);
        assert_eq!(manifest_sources(200, Some("{\"a\":1}"), &fallback()), FALLBACK_SOURCES);
        assert_eq!(manifest_sources(200, None, &fallback()), FALLBACK_SOURCES);
    }

    #[test]
    fn manifest_entries_are_filtered_and_deduplicated() {
        let body = r#"["one.png", "", 3, "two.jpg", "one.png", null]"#;
        assert_eq!(manifest_sources(200, Some(body), &fallback()), vec!["one.png", "two.jpg"]);
    }

    #[test]
    fn webp_variants() {
        assert_eq!(webp_variant("public/memes/foo.png"), "public/memes/foo.webp");
        assert_eq!(webp_variant("a/B.JPEG"), "a/B.webp");
        assert_eq!(webp_variant("a/c.Jpg"), "a/c.webp");
        assert_eq!(webp_variant("a/d.gif"), "a/d.gif");
        assert_eq!(webp_variant("png"), "png");
    }

    #[test]
    fn head_check_selects_source() {
        let paths = ImagePaths::new("public/memes/", "foo.png");
        let mut found = GalleryImage::new(paths.clone(), Loading::Eager);
        assert_eq!(found.resolve(HeadCheck::from_status(200)), "public/memes/foo.webp");

        let mut missing = GalleryImage::new(paths.clone(), Loading::Eager);
        assert_eq!(missing.resolve(HeadCheck::from_status(404)), "public/memes/foo.png");

        let mut failed = GalleryImage::new(paths, Loading::Lazy);
        assert_eq!(failed.resolve(HeadCheck::Failed), "public/memes/foo.png");
    }

    #[test]
    fn placeholder_click_does_nothing() {
        let mut image = GalleryImage::new(ImagePaths::new("m/", "a.png"), Loading::Lazy);
        assert_eq!(image.download(), None);
        assert!(image.observe());
        assert_eq!(image.download(), None);
        assert!(!image.observe());

        image.resolve(HeadCheck::Found);
        image.mark_loaded();
        assert_eq!(image.state(), &ImageState::Loaded("m/a.webp".to_string()));
        assert_eq!(image.download(), Some(("m/a.png".to_string(), "a.png".to_string())));
        assert!(!image.observe());
    }

    #[test]
    fn leading_images_load_eagerly() {
        let sources = unique_sources(FALLBACK_SOURCES);
        let images = build_images(&sources, &GalleryConfig::default());
        let eager = images.iter().filter(|image| image.loading == Loading::Eager).count();
        assert_eq!(eager, 4);
        assert_eq!(images[4].loading, Loading::Lazy);

        let short = build_images(&sources[..2], &GalleryConfig::default());
        assert!(short.iter().all(|image| image.loading == Loading::Eager));
    }

    #[test]
    fn carousel_step_from_item_and_gap() {
        let config = GalleryConfig::default();
        assert_eq!(carousel_step(Some(240.0), "24px", &config), 264.0);
        assert_eq!(carousel_step(Some(240.0), "normal", &config), 256.0);
        assert_eq!(carousel_step(None, "24px", &config), 260.0);
    }

    #[test]
    fn file_name_is_last_segment() {
        assert_eq!(file_name("public/memes/zillameme1.png"), "zillameme1.png");
        assert_eq!(file_name("plain.png"), "plain.png");
    }
}

use crate::draw::{anchor_bottom_right, Bitmap, Rect, Surface, TextStyle, UploadSequence};

pub const DEFAULT_BACKGROUND: &str = "#26b4ff";
pub const DEFAULT_HEADLINE: &str = "GODZILLA #WEIRD";

pub const HEADLINE_STYLE: TextStyle = TextStyle {
    font: "48px Chewy, Poppins, sans-serif",
    fill: "#000",
    stroke: "#fff",
    line_width: 8.0,
};
pub const HEADLINE_ORIGIN: (f64, f64) = (40.0, 240.0);

pub const IMAGE_MAX_WIDTH: f64 = 320.0;
pub const IMAGE_MARGIN: f64 = 40.0;

/// Background, headline and optional sticker image of the banner maker.
#[derive(Debug)]
pub struct Banner<I> {
    background: String,
    headline: String,
    image: Option<I>,
    uploads: UploadSequence,
}

impl<I> Default for Banner<I> {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            headline: DEFAULT_HEADLINE.to_string(),
            image: None,
            uploads: UploadSequence::default(),
        }
    }
}

impl<I: Bitmap> Banner<I> {
    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn set_background(&mut self, color: &str) {
        self.background = color.to_string();
    }

    /// An empty field falls back to the default headline.
    pub fn set_headline(&mut self, text: &str) {
        self.headline = if text.is_empty() {
            DEFAULT_HEADLINE.to_string()
        } else {
            text.to_string()
        };
    }

    pub fn set_image(&mut self, image: I) {
        self.image = Some(image);
    }

    pub fn begin_upload(&mut self) -> u64 {
        self.uploads.begin()
    }

    /// Keeps a decoded upload only if no newer one has started since.
    pub fn finish_upload(&mut self, ticket: u64, image: I) -> bool {
        if !self.uploads.is_current(ticket) {
            return false;
        }
        self.set_image(image);
        true
    }

    pub fn render<S>(&self, surface: &mut S)
    where
        S: Surface<Image = I>,
    {
        let size = surface.size();
        surface.fill_rect(&self.background, Rect::from_size(size));
        let (x, y) = HEADLINE_ORIGIN;
        surface.outlined_text(&self.headline, x, y, &HEADLINE_STYLE);
        if let Some(image) = &self.image {
            if let Some(rect) =
                anchor_bottom_right(image.natural_size(), size, IMAGE_MAX_WIDTH, IMAGE_MARGIN)
            {
                surface.draw_image(image, rect);
            }
        }
    }
}

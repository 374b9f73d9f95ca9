use crate::draw::{fit_centered, Bitmap, Rect, Surface, UploadSequence, WidgetError};

pub const BACKDROP: &str = "#ffffff";

/// Fixed set of image slots drawn back-to-front in index order.
#[derive(Debug)]
pub struct LayerStack<I> {
    slots: Vec<Option<I>>,
    uploads: Vec<UploadSequence>,
}

impl<I: Bitmap> LayerStack<I> {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| None).collect(),
            uploads: vec![UploadSequence::default(); count],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&I> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Replaces whatever image `slot` held.
    pub fn set(&mut self, slot: usize, image: I) -> Result<(), WidgetError> {
        let slots = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(WidgetError::SlotOutOfRange { slot, slots })?;
        *entry = Some(image);
        Ok(())
    }

    /// Starts an upload into `slot`, superseding any decode still pending
    /// for it.
    pub fn begin_upload(&mut self, slot: usize) -> Result<u64, WidgetError> {
        let slots = self.uploads.len();
        self.uploads
            .get_mut(slot)
            .map(UploadSequence::begin)
            .ok_or(WidgetError::SlotOutOfRange { slot, slots })
    }

    /// Stores a decoded upload unless a newer one was started for the same
    /// slot. Returns whether the image was stored.
    pub fn finish_upload(
        &mut self,
        slot: usize,
        ticket: u64,
        image: I,
    ) -> Result<bool, WidgetError> {
        let slots = self.uploads.len();
        let uploads = self
            .uploads
            .get(slot)
            .ok_or(WidgetError::SlotOutOfRange { slot, slots })?;
        if !uploads.is_current(ticket) {
            return Ok(false);
        }
        self.set(slot, image)?;
        Ok(true)
    }

    pub fn populated(&self) -> impl Iterator<Item = (usize, &I)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|image| (index, image)))
    }

    pub fn render<S>(&self, surface: &mut S)
    where
        S: Surface<Image = I>,
    {
        let size = surface.size();
        surface.clear();
        surface.fill_rect(BACKDROP, Rect::from_size(size));
        for (_, image) in self.populated() {
            if let Some(rect) = fit_centered(image.natural_size(), size) {
                surface.draw_image(image, rect);
            }
        }
    }
}

/// Parses the slot attribute of a layer file input (`data-layer="2"`).
pub fn parse_slot(raw: &str) -> Result<usize, WidgetError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| WidgetError::InvalidSlot(raw.to_string()))
}

/// Slot count needed to address every parsed index.
pub fn slots_needed<'a>(raw: impl IntoIterator<Item = &'a str>) -> usize {
    raw.into_iter()
        .filter_map(|value| parse_slot(value).ok())
        .map(|slot| slot + 1)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::testing::{FakeImage, Op, Recorder};

    fn drawn(surface: &Recorder) -> Vec<(u32, Rect)> {
        surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Image(id, rect) => Some((*id, *rect)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn second_upload_replaces_slot_and_fits_canvas() {
        let mut stack = LayerStack::with_slots(3);
        stack.set(1, FakeImage::new(1, 200.0, 200.0)).unwrap();
        stack.set(1, FakeImage::new(2, 1600.0, 900.0)).unwrap();
        let mut surface = Recorder::new(600.0, 600.0);
        stack.render(&mut surface);

        let images = drawn(&surface);
        assert_eq!(images.len(), 1);
        let (id, rect) = images[0];
        assert_eq!(id, 2);
        assert!(rect.width <= 600.0 && rect.height <= 600.0);
        assert!((rect.width - 600.0).abs() < 1e-9 || (rect.height - 600.0).abs() < 1e-9);
        assert!((rect.y - (600.0 - rect.height) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn redraw_clears_fills_then_draws_in_slot_order() {
        let mut stack = LayerStack::with_slots(4);
        stack.set(3, FakeImage::new(30, 10.0, 10.0)).unwrap();
        stack.set(0, FakeImage::new(0, 10.0, 10.0)).unwrap();
        stack.set(2, FakeImage::new(20, 10.0, 10.0)).unwrap();
        let mut surface = Recorder::new(100.0, 50.0);
        stack.render(&mut surface);

        assert_eq!(surface.ops[0], Op::Clear);
        assert!(matches!(&surface.ops[1], Op::Fill(color, _) if color == BACKDROP));
        let order: Vec<u32> = drawn(&surface).into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![0, 20, 30]);
    }

    #[test]
    fn empty_stack_renders_backdrop_only() {
        let stack = LayerStack::<FakeImage>::with_slots(2);
        let mut surface = Recorder::new(10.0, 10.0);
        stack.render(&mut surface);
        assert_eq!(surface.ops.len(), 2);
    }

    #[test]
    fn set_rejects_unknown_slot() {
        let mut stack = LayerStack::with_slots(2);
        assert_eq!(
            stack.set(2, FakeImage::new(1, 1.0, 1.0)),
            Err(WidgetError::SlotOutOfRange { slot: 2, slots: 2 })
        );
        assert!(stack.get(0).is_none());
    }

    #[test]
    fn slower_earlier_upload_does_not_override_newer_one() {
        let mut stack = LayerStack::with_slots(2);
        let first = stack.begin_upload(1).unwrap();
        let second = stack.begin_upload(1).unwrap();
        let other = stack.begin_upload(0).unwrap();

        assert_eq!(stack.finish_upload(1, second, FakeImage::new(2, 10.0, 10.0)), Ok(true));
        assert_eq!(stack.finish_upload(1, first, FakeImage::new(1, 10.0, 10.0)), Ok(false));
        assert_eq!(stack.get(1).map(|image| image.id), Some(2));

        assert_eq!(stack.finish_upload(0, other, FakeImage::new(5, 10.0, 10.0)), Ok(true));
        assert_eq!(
            stack.begin_upload(2),
            Err(WidgetError::SlotOutOfRange { slot: 2, slots: 2 })
        );
    }

    #[test]
    fn slot_attributes() {
        assert_eq!(parse_slot(" 2 "), Ok(2));
        assert!(parse_slot("top").is_err());
        assert_eq!(slots_needed(["0", "3", "bogus", "1"]), 4);
        assert_eq!(slots_needed(Vec::<&str>::new()), 0);
    }
}

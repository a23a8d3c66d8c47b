use crate::options::{Align, ContainScroll};

const MERGE_EPSILON: f32 = 1e-4;

/// Snap points of a strip of equally sized slides, in viewport-width units.
/// A snap is the scroll offset at which its slide is aligned in the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSnaps {
    snaps: Vec<f32>,
    slide_to_snap: Vec<usize>,
    slide_size: f32,
    content_size: f32,
}

impl ScrollSnaps {
    pub fn compute(count: usize, slide_size: f32, align: Align, contain: ContainScroll, looping: bool) -> Self {
        let content_size = count as f32 * slide_size;
        let align_offset = match align {
            Align::Start => 0.0,
            Align::Center => (1.0 - slide_size) * 0.5,
            Align::End => 1.0 - slide_size,
        };
        let raw: Vec<f32> = (0..count).map(|i| i as f32 * slide_size - align_offset).collect();

        // Containment only makes sense when the strip has edges
        if looping || contain == ContainScroll::None {
            return Self {
                slide_to_snap: (0..count).collect(),
                snaps: raw,
                slide_size,
                content_size,
            };
        }

        let max_scroll = (content_size - 1.0).max(0.0);
        let clamped = raw.iter().map(|snap| snap.clamp(0.0, max_scroll));

        let mut snaps: Vec<f32> = Vec::with_capacity(count);
        let mut slide_to_snap = Vec::with_capacity(count);
        for snap in clamped {
            let merge = contain == ContainScroll::TrimSnaps
                && snaps.last().is_some_and(|last| (snap - last).abs() < MERGE_EPSILON);
            if !merge {
                snaps.push(snap);
            }
            slide_to_snap.push(snaps.len() - 1);
        }

        Self { snaps, slide_to_snap, slide_size, content_size }
    }

    pub fn len(&self) -> usize {
        self.snaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snaps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.snaps.get(index).copied()
    }

    pub fn snap_for_slide(&self, slide: usize) -> Option<usize> {
        self.slide_to_snap.get(slide).copied()
    }

    pub fn slide_size(&self) -> f32 {
        self.slide_size
    }

    /// Length of the whole strip, which is also the loop period.
    pub fn content_size(&self) -> f32 {
        self.content_size
    }
}

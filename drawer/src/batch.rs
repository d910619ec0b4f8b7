//! Per-frame grouping of live, visible segments into width-type batches.
//!
//! Rebuilt from scratch every frame in two passes: a counting pass so each
//! bucket allocates at most once, then a fill pass. Capacity is grow-only
//! and reused across frames with similar segment counts.

use overdraw_channels::{ChannelRegistry, RenderMode, WidthType};

use crate::line::LineRegistry;
use crate::math::Vec3;

/// Contiguous arrays for all segments sharing one width type this frame.
#[derive(Default)]
pub struct WidthBatch {
    /// World-space (start, end) pairs.
    pub points: Vec<[Vec3; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub widths: Vec<f32>,
}

impl WidthBatch {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn reset(&mut self, count: usize) {
        self.points.clear();
        self.colors.clear();
        self.widths.clear();
        self.points.reserve(count);
        self.colors.reserve(count);
        self.widths.reserve(count);
    }

    fn push(&mut self, start: Vec3, end: Vec3, color: [f32; 4], width: f32) {
        self.points.push([start, end]);
        self.colors.push(color);
        self.widths.push(width);
    }
}

/// One [`WidthBatch`] per width type, indexed by [`WidthType::index`].
#[derive(Default)]
pub struct LineBatches {
    buckets: [WidthBatch; 4],
}

impl LineBatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self, width_type: WidthType) -> &WidthBatch {
        &self.buckets[width_type.index()]
    }

    /// Total segments across all buckets.
    pub fn total_len(&self) -> usize {
        self.buckets.iter().map(WidthBatch::len).sum()
    }

    /// Rebuild all buckets from the current live segment set.
    ///
    /// Only `Runtime`-mode buffers whose channel is visible contribute;
    /// disabled channels contribute nothing (their buffers keep expiring on
    /// schedule in the sweep, visibility never freezes them).
    pub fn rebuild(&mut self, lines: &LineRegistry, channels: &ChannelRegistry) {
        let mut counts = [0usize; 4];
        for (id, buffer) in lines.iter() {
            let policy = buffer.policy();
            if policy.mode != RenderMode::Runtime || !channels.visualization_enabled(id) {
                continue;
            }
            counts[policy.width_type.index()] += buffer.segments().len();
        }

        for (bucket, count) in self.buckets.iter_mut().zip(counts) {
            bucket.reset(count);
        }

        for (id, buffer) in lines.iter() {
            let policy = buffer.policy();
            if policy.mode != RenderMode::Runtime || !channels.visualization_enabled(id) {
                continue;
            }
            let bucket = &mut self.buckets[policy.width_type.index()];
            for segment in buffer.segments() {
                bucket.push(segment.start, segment.end, segment.color, segment.width);
            }
        }
    }
}

//! Per-channel transient line storage and expiry sweeping.
//!
//! Each channel owns one unordered buffer of timed line segments. Removal
//! uses swap-remove, so segment order is never semantically significant —
//! batching treats a buffer as a set.

use std::collections::HashMap;

use overdraw_channels::{ChannelId, ChannelRegistry, RenderMode, RenderPolicy};

use crate::math::Vec3;

/// One buffered line segment.
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: [f32; 4],
    /// Absolute timestamp (seconds) after which the segment is discarded.
    pub expiry_time: f32,
    /// Width scalar; meaning depends on the owning channel's width type.
    pub width: f32,
}

/// Unordered segment storage for one channel, plus that channel's render
/// policy snapshot.
pub struct ChannelLineBuffer {
    segments: Vec<LineSegment>,
    policy: RenderPolicy,
}

impl ChannelLineBuffer {
    fn new(policy: RenderPolicy) -> Self {
        Self {
            segments: Vec::new(),
            policy,
        }
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    pub(crate) fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }

    /// Remove expired segments with swap-remove.
    ///
    /// Iterates backward so the element swapped into slot `i` has already
    /// been examined. The comparison is strictly `now > expiry_time`, which
    /// lets a zero-duration segment survive exactly the render pass of the
    /// frame it was submitted in.
    pub(crate) fn sweep(&mut self, now: f32) {
        for i in (0..self.segments.len()).rev() {
            if now > self.segments[i].expiry_time {
                self.segments.swap_remove(i);
            }
        }
    }
}

/// Mapping from channel identity to its line buffer; the single source of
/// truth queried once per frame by the batcher.
#[derive(Default)]
pub struct LineRegistry {
    buffers: HashMap<ChannelId, ChannelLineBuffer>,
}

impl LineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffer for `id`, lazily created with the given policy snapshot.
    pub(crate) fn buffer_mut(
        &mut self,
        id: ChannelId,
        policy: RenderPolicy,
    ) -> &mut ChannelLineBuffer {
        self.buffers
            .entry(id)
            .or_insert_with(|| ChannelLineBuffer::new(policy))
    }

    pub fn get(&self, id: ChannelId) -> Option<&ChannelLineBuffer> {
        self.buffers.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &ChannelLineBuffer)> {
        self.buffers.iter().map(|(id, buffer)| (*id, buffer))
    }

    /// Total live segment count across all buffers.
    pub fn live_count(&self) -> usize {
        self.buffers.values().map(|b| b.segments.len()).sum()
    }

    /// Pull current policies from the channel registry so that mid-frame
    /// policy changes take effect on this frame's batching pass.
    pub(crate) fn refresh_policies(&mut self, channels: &ChannelRegistry) {
        for (id, buffer) in &mut self.buffers {
            buffer.policy = channels.policy(*id);
        }
    }

    /// Expire stale segments in every buffer. Editor-only buffers are
    /// cleared outright when running outside an editor context — their
    /// content must never reach end users.
    pub(crate) fn sweep(&mut self, now: f32, editor_context: bool) {
        for buffer in self.buffers.values_mut() {
            if buffer.policy.mode == RenderMode::EditorOnly && !editor_context {
                buffer.clear();
                continue;
            }
            buffer.sweep(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overdraw_channels::RenderPolicy;

    fn segment(tag: f32, expiry: f32) -> LineSegment {
        // `tag` is smuggled through start.x so tests can identify survivors
        LineSegment {
            start: Vec3::new(tag, 0.0, 0.0),
            end: Vec3::new(tag, 1.0, 0.0),
            color: [1.0; 4],
            expiry_time: expiry,
            width: 1.0,
        }
    }

    fn surviving_tags(buffer: &ChannelLineBuffer) -> Vec<i32> {
        let mut tags: Vec<i32> = buffer.segments().iter().map(|s| s.start.x as i32).collect();
        tags.sort_unstable();
        tags
    }

    #[test]
    fn test_sweep_keeps_exactly_the_unexpired_set() {
        let mut buffer = ChannelLineBuffer::new(RenderPolicy::default());
        buffer.push(segment(0.0, 1.0));
        buffer.push(segment(1.0, 5.0));
        buffer.push(segment(2.0, 2.0));
        buffer.push(segment(3.0, 9.0));
        buffer.push(segment(4.0, 0.5));

        buffer.sweep(3.0);
        assert_eq!(surviving_tags(&buffer), vec![1, 3]);
    }

    #[test]
    fn test_sweep_boundary_is_strict() {
        let mut buffer = ChannelLineBuffer::new(RenderPolicy::default());
        buffer.push(segment(0.0, 2.0));

        // At exactly the expiry timestamp the segment is still live
        buffer.sweep(2.0);
        assert_eq!(buffer.segments().len(), 1);

        buffer.sweep(2.0 + f32::EPSILON * 4.0);
        assert!(buffer.segments().is_empty());
    }

    #[test]
    fn test_sweep_removing_every_segment() {
        let mut buffer = ChannelLineBuffer::new(RenderPolicy::default());
        for i in 0..10 {
            buffer.push(segment(i as f32, i as f32 * 0.1));
        }
        buffer.sweep(100.0);
        assert!(buffer.segments().is_empty());
    }

    #[test]
    fn test_editor_only_buffers_cleared_outside_editor_context() {
        let mut channels = ChannelRegistry::new();
        let editor = channels.register("Editor", [1.0; 4], None);
        let runtime = channels.register("Runtime", [1.0; 4], None);
        channels.set_policy(
            editor,
            RenderPolicy {
                mode: RenderMode::EditorOnly,
                ..RenderPolicy::default()
            },
        );

        let mut lines = LineRegistry::new();
        lines
            .buffer_mut(editor, channels.policy(editor))
            .push(segment(0.0, 100.0));
        lines
            .buffer_mut(runtime, channels.policy(runtime))
            .push(segment(1.0, 100.0));

        lines.refresh_policies(&channels);
        lines.sweep(0.0, false);
        assert!(lines.get(editor).unwrap().segments().is_empty());
        assert_eq!(lines.get(runtime).unwrap().segments().len(), 1);

        // Inside an editor context the same buffer survives
        lines
            .buffer_mut(editor, channels.policy(editor))
            .push(segment(2.0, 100.0));
        lines.sweep(0.0, true);
        assert_eq!(lines.get(editor).unwrap().segments().len(), 1);
    }

    #[test]
    fn test_lazy_buffer_creation_snapshots_policy() {
        let mut channels = ChannelRegistry::new();
        let id = channels.register("Nav", [1.0; 4], None);
        let mut lines = LineRegistry::new();

        assert!(lines.get(id).is_none());
        lines.buffer_mut(id, channels.policy(id));
        assert_eq!(lines.get(id).unwrap().policy(), channels.policy(id));
    }
}

use std::collections::HashMap;

use crate::RenderPolicy;

/// Stable handle to a registered channel.
///
/// Ids are small indices into the owning [`ChannelRegistry`] and are only
/// meaningful for the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u32);

struct ChannelEntry {
    name: String,
    color: [f32; 4],
    parent: Option<ChannelId>,
    enabled: bool,
    policy: RenderPolicy,
}

/// Registry of named debug channels.
///
/// Channels form a tree via explicit parent references. A channel's
/// effective visibility is its own flag ANDed with every ancestor's flag,
/// so disabling a parent silences the whole subtree without touching the
/// children's local state.
#[derive(Default)]
pub struct ChannelRegistry {
    channels: Vec<ChannelEntry>,
    by_name: HashMap<String, ChannelId>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel. Returns the existing id if the name is taken.
    pub fn register(
        &mut self,
        name: &str,
        color: [f32; 4],
        parent: Option<ChannelId>,
    ) -> ChannelId {
        if let Some(&existing) = self.by_name.get(name) {
            log::warn!("channel {name:?} is already registered; reusing its id");
            return existing;
        }

        let id = ChannelId(self.channels.len() as u32);
        self.channels.push(ChannelEntry {
            name: name.to_string(),
            color,
            parent,
            enabled: true,
            policy: RenderPolicy::default(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Look up a channel by name.
    pub fn find(&self, name: &str) -> Option<ChannelId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: ChannelId) -> &str {
        &self.entry(id).name
    }

    /// Slash-joined path from the root ancestor down to this channel.
    pub fn full_name(&self, id: ChannelId) -> String {
        match self.entry(id).parent {
            Some(parent) => format!("{}/{}", self.full_name(parent), self.entry(id).name),
            None => self.entry(id).name.clone(),
        }
    }

    pub fn color(&self, id: ChannelId) -> [f32; 4] {
        self.entry(id).color
    }

    pub fn parent(&self, id: ChannelId) -> Option<ChannelId> {
        self.entry(id).parent
    }

    /// Distance from the root of this channel's tree (root = 0).
    pub fn depth(&self, id: ChannelId) -> u32 {
        match self.entry(id).parent {
            Some(parent) => self.depth(parent) + 1,
            None => 0,
        }
    }

    /// The channel's own flag, ignoring ancestors.
    pub fn local_enabled(&self, id: ChannelId) -> bool {
        self.entry(id).enabled
    }

    pub fn set_enabled(&mut self, id: ChannelId, enabled: bool) {
        self.entry_mut(id).enabled = enabled;
    }

    /// Whether this channel and all of its ancestors permit drawing.
    pub fn visualization_enabled(&self, id: ChannelId) -> bool {
        let entry = self.entry(id);
        entry.enabled
            && entry
                .parent
                .is_none_or(|parent| self.visualization_enabled(parent))
    }

    pub fn policy(&self, id: ChannelId) -> RenderPolicy {
        self.entry(id).policy
    }

    pub fn set_policy(&mut self, id: ChannelId, policy: RenderPolicy) {
        self.entry_mut(id).policy = policy;
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Iterate over all channel ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ChannelId> + '_ {
        (0..self.channels.len() as u32).map(ChannelId)
    }

    fn entry(&self, id: ChannelId) -> &ChannelEntry {
        self.channels
            .get(id.0 as usize)
            .expect("ChannelId was not issued by this registry")
    }

    fn entry_mut(&mut self, id: ChannelId) -> &mut ChannelEntry {
        self.channels
            .get_mut(id.0 as usize)
            .expect("ChannelId was not issued by this registry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderMode, WidthType};

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_register_and_find() {
        let mut registry = ChannelRegistry::new();
        let physics = registry.register("Physics", WHITE, None);
        assert_eq!(registry.find("Physics"), Some(physics));
        assert_eq!(registry.find("Audio"), None);
        assert_eq!(registry.name(physics), "Physics");
    }

    #[test]
    fn test_duplicate_name_returns_existing_id() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut registry = ChannelRegistry::new();
        let first = registry.register("AI", WHITE, None);
        let second = registry.register("AI", [1.0, 0.0, 0.0, 1.0], None);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        // Original registration wins
        assert_eq!(registry.color(first), WHITE);
    }

    #[test]
    fn test_full_name_and_depth() {
        let mut registry = ChannelRegistry::new();
        let root = registry.register("Game", WHITE, None);
        let ai = registry.register("AI", WHITE, Some(root));
        let pathing = registry.register("Pathing", WHITE, Some(ai));

        assert_eq!(registry.full_name(pathing), "Game/AI/Pathing");
        assert_eq!(registry.depth(root), 0);
        assert_eq!(registry.depth(pathing), 2);
    }

    #[test]
    fn test_visibility_requires_all_ancestors() {
        let mut registry = ChannelRegistry::new();
        let root = registry.register("Game", WHITE, None);
        let child = registry.register("AI", WHITE, Some(root));

        assert!(registry.visualization_enabled(child));

        // Disabling the parent silences the child without touching its flag
        registry.set_enabled(root, false);
        assert!(!registry.visualization_enabled(child));
        assert!(registry.local_enabled(child));

        registry.set_enabled(root, true);
        assert!(registry.visualization_enabled(child));

        registry.set_enabled(child, false);
        assert!(!registry.visualization_enabled(child));
        assert!(registry.visualization_enabled(root));
    }

    #[test]
    #[should_panic(expected = "ChannelId was not issued by this registry")]
    fn test_foreign_id_panics_with_contract_message() {
        let mut issuer = ChannelRegistry::new();
        let foreign = issuer.register("Physics", WHITE, None);

        let other = ChannelRegistry::new();
        other.name(foreign);
    }

    #[test]
    fn test_policy_roundtrip() {
        let mut registry = ChannelRegistry::new();
        let id = registry.register("Nav", WHITE, None);

        let policy = RenderPolicy {
            mode: RenderMode::EditorOnly,
            width_type: WidthType::Pixels,
            width: 3.0,
        };
        registry.set_policy(id, policy);
        assert_eq!(registry.policy(id), policy);
    }
}

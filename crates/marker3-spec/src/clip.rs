//! Marker animation clips and the role-to-handle bindings the builders consume.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::controller::ClipHandle;

/// Length of a single keyframe step (one frame at 60 fps).
pub const KEYFRAME_SECONDS: f64 = 1.0 / 60.0;

/// Component type animated by every marker clip.
pub const MARKER_COMPONENT: &str = "TrailRenderer";

/// Which state a clip is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClipRole {
    /// Starts drawing; attached to the gesture layer's `Activate` state.
    ActivateDraw,
    /// Clears the trail; attached to the gesture layer's `Reset` state.
    ResetErase,
    /// Enables the marker; attached to the toggle layer's `On` state.
    ToggleOn,
    /// Disables the marker; attached to the toggle layer's `Off` state.
    ToggleOff,
}

impl ClipRole {
    /// Returns the role as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipRole::ActivateDraw => "activate-draw",
            ClipRole::ResetErase => "reset-erase",
            ClipRole::ToggleOn => "toggle-on",
            ClipRole::ToggleOff => "toggle-off",
        }
    }

    /// Returns all roles.
    pub fn all() -> &'static [ClipRole] {
        &[
            ClipRole::ActivateDraw,
            ClipRole::ResetErase,
            ClipRole::ToggleOn,
            ClipRole::ToggleOff,
        ]
    }
}

impl std::fmt::Display for ClipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clip handles keyed by role. A missing role leaves its state without motion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipSet {
    handles: BTreeMap<ClipRole, ClipHandle>,
}

impl ClipSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handle for a role (builder style).
    pub fn with(mut self, role: ClipRole, handle: ClipHandle) -> Self {
        self.insert(role, handle);
        self
    }

    /// Sets the handle for a role, replacing any previous one.
    pub fn insert(&mut self, role: ClipRole, handle: ClipHandle) {
        self.handles.insert(role, handle);
    }

    /// Handle for a role, if supplied.
    pub fn get(&self, role: ClipRole) -> Option<&ClipHandle> {
        self.handles.get(&role)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// A single curve sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
}

/// A float property curve on one component of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationCurve {
    /// Object path relative to the avatar root.
    pub path: String,
    /// Component type name.
    pub component: String,
    /// Serialized property name.
    pub property: String,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Linear curve holding `value` from 0 to `duration`.
    pub fn constant(
        path: impl Into<String>,
        component: impl Into<String>,
        property: impl Into<String>,
        value: f64,
        duration: f64,
    ) -> Self {
        Self {
            path: path.into(),
            component: component.into(),
            property: property.into(),
            keyframes: vec![
                Keyframe { time: 0.0, value },
                Keyframe {
                    time: duration,
                    value,
                },
            ],
        }
    }
}

/// An animation clip description, ready for the host to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationClip {
    pub name: String,
    pub curves: Vec<AnimationCurve>,
}

impl AnimationClip {
    /// Clip length in seconds.
    pub fn length(&self) -> f64 {
        self.curves
            .iter()
            .flat_map(|c| c.keyframes.iter())
            .map(|k| k.time)
            .fold(0.0, f64::max)
    }
}

/// The four marker clips, keyed by role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipLibrary {
    clips: BTreeMap<ClipRole, AnimationClip>,
}

impl ClipLibrary {
    /// Clip for a role.
    pub fn get(&self, role: ClipRole) -> Option<&AnimationClip> {
        self.clips.get(&role)
    }

    /// Iterates clips in role order.
    pub fn iter(&self) -> impl Iterator<Item = (ClipRole, &AnimationClip)> {
        self.clips.iter().map(|(role, clip)| (*role, clip))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Handles for every clip, named after the clip.
    pub fn handles(&self) -> ClipSet {
        let mut set = ClipSet::new();
        for (role, clip) in &self.clips {
            set.insert(*role, ClipHandle::new(clip.name.clone()));
        }
        set
    }
}

/// Synthesizes the marker clips for the trail renderer at `binding_path`.
///
/// Each clip is a one-frame constant curve:
///
/// | role | clip | property | value |
/// |---|---|---|---|
/// | activate-draw | `Drawing` | `m_Emitting` | 1 |
/// | reset-erase | `EraseAll` | `m_Time` | 0 |
/// | toggle-on | `MarkerOn` | `m_Enabled` | 1 |
/// | toggle-off | `MarkerOff` | `m_Enabled` | 0 |
pub fn synthesize_clips(binding_path: &str) -> ClipLibrary {
    let clip = |name: &str, property: &str, value: f64| AnimationClip {
        name: name.to_string(),
        curves: vec![AnimationCurve::constant(
            binding_path,
            MARKER_COMPONENT,
            property,
            value,
            KEYFRAME_SECONDS,
        )],
    };

    let mut clips = BTreeMap::new();
    clips.insert(ClipRole::ActivateDraw, clip("Drawing", "m_Emitting", 1.0));
    clips.insert(ClipRole::ResetErase, clip("EraseAll", "m_Time", 0.0));
    clips.insert(ClipRole::ToggleOn, clip("MarkerOn", "m_Enabled", 1.0));
    clips.insert(ClipRole::ToggleOff, clip("MarkerOff", "m_Enabled", 0.0));
    ClipLibrary { clips }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn synthesizes_one_clip_per_role() {
        let library = synthesize_clips("Armature/Hips/Marker");
        assert_eq!(library.len(), ClipRole::all().len());
        for role in ClipRole::all() {
            assert!(library.get(*role).is_some(), "missing {}", role);
        }
    }

    #[test]
    fn clips_are_single_frame_constants() {
        let library = synthesize_clips("Marker");
        for (_, clip) in library.iter() {
            assert_eq!(clip.curves.len(), 1);
            let curve = &clip.curves[0];
            assert_eq!(curve.path, "Marker");
            assert_eq!(curve.component, MARKER_COMPONENT);
            assert_eq!(curve.keyframes.len(), 2);
            assert_eq!(curve.keyframes[0].value, curve.keyframes[1].value);
            assert!((clip.length() - KEYFRAME_SECONDS).abs() < 1e-12);
        }
    }

    #[test]
    fn draw_clip_enables_emission() {
        let library = synthesize_clips("Marker");
        let draw = library.get(ClipRole::ActivateDraw).unwrap();
        assert_eq!(draw.name, "Drawing");
        assert_eq!(draw.curves[0].property, "m_Emitting");
        assert_eq!(draw.curves[0].keyframes[0].value, 1.0);

        let erase = library.get(ClipRole::ResetErase).unwrap();
        assert_eq!(erase.curves[0].property, "m_Time");
        assert_eq!(erase.curves[0].keyframes[1].value, 0.0);
    }

    #[test]
    fn handles_are_named_after_clips() {
        let handles = synthesize_clips("Marker").handles();
        assert_eq!(
            handles.get(ClipRole::ToggleOff),
            Some(&ClipHandle::new("MarkerOff"))
        );
        assert_eq!(
            handles.get(ClipRole::ToggleOn),
            Some(&ClipHandle::new("MarkerOn"))
        );
    }

    #[test]
    fn clip_set_serializes_roles_as_keys() {
        let set = ClipSet::new().with(ClipRole::ResetErase, ClipHandle::new("EraseAll"));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({ "reset-erase": "EraseAll" }));
    }
}

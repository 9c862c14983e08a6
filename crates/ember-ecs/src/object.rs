//! Objects and their attached behaviors

use crate::behavior::{Behavior, BehaviorContext, Canvas, FrameTime};
use crate::behaviors::{Animation, Transform};
use ember_core::{EmberError, ObjectId, Result};

/// How `Object::attach` treats a variant that disallows duplicates and is
/// already present on the object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachPolicy {
    /// Fail with `EmberError::DuplicateBehavior`
    Reject,
    /// Discard the new instance and return the slot of the existing one
    MergeIntoExisting,
}

/// Location of a behavior on its object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorSlot {
    Transform,
    Attached(usize),
}

struct Attached {
    behavior: Box<dyn Behavior>,
    enabled: bool,
}

/// A named container of behaviors with exactly one Transform
pub struct Object {
    id: ObjectId,
    name: Option<String>,
    enabled: bool,
    transform: Transform,
    behaviors: Vec<Attached>,
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Object {
    /// Create an unnamed object with a default Transform
    pub fn new() -> Self {
        Self {
            id: ObjectId::new(),
            name: None,
            enabled: true,
            transform: Transform::default(),
            behaviors: Vec::new(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        let mut object = Self::new();
        object.name = Some(name.into());
        object
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The object's name, empty if it was never set
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether a name has been set, including an explicitly empty one
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Attach a behavior, rejecting a second instance of a variant that
    /// disallows duplicates.
    ///
    /// Unlike the scene loader, which merges into the existing instance,
    /// this is an error.
    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior>) -> Result<BehaviorSlot> {
        self.attach(behavior, AttachPolicy::Reject)
    }

    /// Attach a behavior using an explicit duplicate policy
    pub fn attach(
        &mut self,
        behavior: Box<dyn Behavior>,
        policy: AttachPolicy,
    ) -> Result<BehaviorSlot> {
        if !behavior.duplicates_allowed() {
            if let Some(existing) = self.find_same_variant(behavior.as_ref()) {
                return match policy {
                    AttachPolicy::MergeIntoExisting => Ok(existing),
                    AttachPolicy::Reject => Err(EmberError::DuplicateBehavior {
                        behavior: behavior.type_name().to_string(),
                        object: self.name().to_string(),
                    }),
                };
            }
        }

        self.behaviors.push(Attached {
            behavior,
            enabled: true,
        });
        Ok(BehaviorSlot::Attached(self.behaviors.len() - 1))
    }

    fn find_same_variant(&self, behavior: &dyn Behavior) -> Option<BehaviorSlot> {
        let type_id = behavior.as_any().type_id();

        if self.transform.as_any().type_id() == type_id {
            return Some(BehaviorSlot::Transform);
        }

        self.behaviors
            .iter()
            .position(|a| a.behavior.as_any().type_id() == type_id)
            .map(BehaviorSlot::Attached)
    }

    pub fn behavior(&self, slot: BehaviorSlot) -> Option<&dyn Behavior> {
        match slot {
            BehaviorSlot::Transform => Some(&self.transform as &dyn Behavior),
            BehaviorSlot::Attached(i) => self.behaviors.get(i).map(|a| a.behavior.as_ref()),
        }
    }

    pub fn behavior_mut(&mut self, slot: BehaviorSlot) -> Option<&mut dyn Behavior> {
        match slot {
            BehaviorSlot::Transform => Some(&mut self.transform as &mut dyn Behavior),
            BehaviorSlot::Attached(i) => self
                .behaviors
                .get_mut(i)
                .map(|a| a.behavior.as_mut() as &mut dyn Behavior),
        }
    }

    /// Number of behaviors, counting the Transform
    pub fn behavior_count(&self) -> usize {
        1 + self.behaviors.len()
    }

    /// All behaviors in attachment order, Transform first
    pub fn behaviors(&self) -> impl Iterator<Item = &dyn Behavior> {
        std::iter::once(&self.transform as &dyn Behavior)
            .chain(self.behaviors.iter().map(|a| a.behavior.as_ref()))
    }

    /// First behavior of type `T`
    pub fn get_behavior<T: Behavior>(&self) -> Option<&T> {
        self.behaviors().find_map(|b| b.as_any().downcast_ref::<T>())
    }

    pub fn get_behavior_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        if self.transform.as_any().is::<T>() {
            return self.transform.as_any_mut().downcast_mut::<T>();
        }

        self.behaviors
            .iter_mut()
            .find_map(|a| a.behavior.as_any_mut().downcast_mut::<T>())
    }

    /// All behaviors of type `T`, in attachment order
    pub fn get_behaviors_of_type<T: Behavior>(&self) -> Vec<&T> {
        self.behaviors()
            .filter_map(|b| b.as_any().downcast_ref::<T>())
            .collect()
    }

    /// Returns `None` for a slot that does not exist. The Transform is always enabled.
    pub fn is_behavior_enabled(&self, slot: BehaviorSlot) -> Option<bool> {
        match slot {
            BehaviorSlot::Transform => Some(true),
            BehaviorSlot::Attached(i) => self.behaviors.get(i).map(|a| a.enabled),
        }
    }

    /// Returns false if the slot does not name an attached behavior
    pub fn set_behavior_enabled(&mut self, slot: BehaviorSlot, enabled: bool) -> bool {
        match slot {
            BehaviorSlot::Transform => false,
            BehaviorSlot::Attached(i) => match self.behaviors.get_mut(i) {
                Some(attached) => {
                    attached.enabled = enabled;
                    true
                }
                None => false,
            },
        }
    }

    /// Start every behavior, enabled or not
    pub fn start(&mut self, time: FrameTime) {
        let name = self.name.as_deref().unwrap_or("");
        let mut ctx = BehaviorContext {
            object_id: self.id,
            object_name: name,
            transform: &mut self.transform,
            time,
            sprite_frame: None,
        };

        for attached in &mut self.behaviors {
            attached.behavior.start(&mut ctx);
        }
    }

    /// Update every enabled behavior
    pub fn update(&mut self, time: FrameTime) {
        let name = self.name.as_deref().unwrap_or("");
        let mut ctx = BehaviorContext {
            object_id: self.id,
            object_name: name,
            transform: &mut self.transform,
            time,
            sprite_frame: None,
        };

        for attached in self.behaviors.iter_mut().filter(|a| a.enabled) {
            attached.behavior.update(&mut ctx);
        }
    }

    /// Draw every enabled behavior
    pub fn draw(&mut self, time: FrameTime, canvas: &mut dyn Canvas) {
        let sprite_frame = self
            .behaviors
            .iter()
            .filter(|a| a.enabled)
            .find_map(|a| a.behavior.as_any().downcast_ref::<Animation>())
            .and_then(Animation::current_rect);

        let name = self.name.as_deref().unwrap_or("");
        let mut ctx = BehaviorContext {
            object_id: self.id,
            object_name: name,
            transform: &mut self.transform,
            time,
            sprite_frame,
        };

        for attached in self.behaviors.iter_mut().filter(|a| a.enabled) {
            attached.behavior.draw(&mut ctx, canvas);
        }
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("transform", &self.transform)
            .field(
                "behaviors",
                &self
                    .behaviors
                    .iter()
                    .map(|a| a.behavior.type_name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

use facet_serde::{ByteBuffer, ConstByteLength};

use crate::{
    types::ObjectId,
    world::{
        component::{
            component::Component,
            component_kind::ComponentKind,
            error::{ComponentError, ConstructError},
            replicate::{read_field, Replicate},
        },
        stat::stat_definition::HealthStat,
    },
};

/// Hit points of an Object.
///
/// Wire layout (8 bytes): `max_health: i32 LE`, `health: i32 LE`.
///
/// Reaching zero is reported to the caller of [`Health::apply_damage`];
/// what happens to a depleted Object is decided elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Health {
    owner: ObjectId,
    max_health: i32,
    health: i32,
    regen_per_second: f32,
    regen_progress: f32,
}

impl Health {
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Sets health, clamped to `0..=max_health`
    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    /// Subtracts `amount` (negative amounts count as zero). Returns true if
    /// this call brought health to zero.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if self.is_depleted() {
            return false;
        }
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
        self.is_depleted()
    }

    /// Adds `amount` (negative amounts count as zero), up to `max_health`
    pub fn heal(&mut self, amount: i32) {
        self.health = self
            .health
            .saturating_add(amount.max(0))
            .min(self.max_health);
    }

    fn validate(max_health: i32, health: i32) -> Result<(), ComponentError> {
        if max_health <= 0 {
            return Err(ComponentError::OutOfRange {
                kind: ComponentKind::Health,
                field: "max_health",
                value: max_health.to_string(),
            });
        }
        if health < 0 || health > max_health {
            return Err(ComponentError::OutOfRange {
                kind: ComponentKind::Health,
                field: "health",
                value: health.to_string(),
            });
        }
        Ok(())
    }
}

impl Replicate for Health {
    type Stat = HealthStat;

    const KIND: ComponentKind = ComponentKind::Health;

    fn construct(owner: ObjectId, stat: &HealthStat) -> Result<Self, ConstructError> {
        stat.validate()?;
        Ok(Self {
            owner,
            max_health: stat.max_health,
            health: stat.initial_health,
            regen_per_second: stat.regen_per_second,
            regen_progress: 0.0,
        })
    }

    fn owner(&self) -> ObjectId {
        self.owner
    }

    fn attach(&mut self, owner: ObjectId) {
        self.owner = owner;
    }

    fn network_serialize(&self, buffer: &mut ByteBuffer) {
        buffer.write(self.max_health);
        buffer.write(self.health);
    }

    fn network_unserialize(&mut self, buffer: &mut ByteBuffer) -> Result<(), ComponentError> {
        let max_health = read_field::<i32>(Self::KIND, buffer)?;
        let health = read_field::<i32>(Self::KIND, buffer)?;
        Self::validate(max_health, health)?;

        self.max_health = max_health;
        self.health = health;
        Ok(())
    }

    fn update(&mut self, frame_time: f32) -> bool {
        if self.regen_per_second <= 0.0 || self.is_depleted() || self.health >= self.max_health {
            self.regen_progress = 0.0;
            return false;
        }
        if frame_time.is_nan() || frame_time <= 0.0 {
            return false;
        }

        self.regen_progress += self.regen_per_second * frame_time;
        let whole = self.regen_progress.floor();
        if whole < 1.0 {
            return false;
        }
        self.regen_progress -= whole;

        let before = self.health;
        // saturates at i32::MAX for absurd frame times; heal clamps anyway
        self.heal(whole as i32);
        self.health != before
    }

    fn byte_length(&self) -> usize {
        2 * i32::const_byte_length()
    }

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::Health(health) => Some(health),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::Health(health) => Some(health),
            _ => None,
        }
    }

    fn into_component(self) -> Component {
        Component::Health(self)
    }
}

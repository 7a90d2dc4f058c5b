use crate::world::component::{component_kind::ComponentKind, error::ConstructError};

/// Starting values for a Health component
#[derive(Clone, Debug, PartialEq)]
pub struct HealthStat {
    pub max_health: i32,
    pub initial_health: i32,
    /// Health restored per second while alive. Not synchronized.
    pub regen_per_second: f32,
}

impl HealthStat {
    /// Full health, no regeneration
    pub fn new(max_health: i32) -> Self {
        Self {
            max_health,
            initial_health: max_health,
            regen_per_second: 0.0,
        }
    }

    pub fn with_initial_health(mut self, initial_health: i32) -> Self {
        self.initial_health = initial_health;
        self
    }

    pub fn with_regen(mut self, regen_per_second: f32) -> Self {
        self.regen_per_second = regen_per_second;
        self
    }

    pub fn validate(&self) -> Result<(), ConstructError> {
        if self.max_health <= 0 {
            return Err(invalid(ComponentKind::Health, "max_health must be positive"));
        }
        if self.initial_health < 0 || self.initial_health > self.max_health {
            return Err(invalid(
                ComponentKind::Health,
                "initial_health must be within 0..=max_health",
            ));
        }
        if !self.regen_per_second.is_finite() || self.regen_per_second < 0.0 {
            return Err(invalid(
                ComponentKind::Health,
                "regen_per_second must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for HealthStat {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Starting values for a Position component
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionStat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PositionStat {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn validate(&self) -> Result<(), ConstructError> {
        if !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite()) {
            return Err(invalid(
                ComponentKind::Position,
                "coordinates must be finite",
            ));
        }
        Ok(())
    }
}

/// Starting values for a Lifespan component
#[derive(Clone, Debug, PartialEq)]
pub struct LifespanStat {
    pub seconds: f32,
}

impl LifespanStat {
    pub fn new(seconds: f32) -> Self {
        Self { seconds }
    }

    pub fn validate(&self) -> Result<(), ConstructError> {
        if !self.seconds.is_finite() || self.seconds <= 0.0 {
            return Err(invalid(
                ComponentKind::Lifespan,
                "seconds must be finite and positive",
            ));
        }
        Ok(())
    }
}

impl Default for LifespanStat {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A stat definition for any component kind
#[derive(Clone, Debug, PartialEq)]
pub enum StatDefinition {
    Health(HealthStat),
    Position(PositionStat),
    Lifespan(LifespanStat),
}

impl StatDefinition {
    /// Default starting values for `kind`. Used to build a component that is
    /// about to be overwritten from the network.
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Health => StatDefinition::Health(HealthStat::default()),
            ComponentKind::Position => StatDefinition::Position(PositionStat::default()),
            ComponentKind::Lifespan => StatDefinition::Lifespan(LifespanStat::default()),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            StatDefinition::Health(_) => ComponentKind::Health,
            StatDefinition::Position(_) => ComponentKind::Position,
            StatDefinition::Lifespan(_) => ComponentKind::Lifespan,
        }
    }

    pub fn validate(&self) -> Result<(), ConstructError> {
        match self {
            StatDefinition::Health(stat) => stat.validate(),
            StatDefinition::Position(stat) => stat.validate(),
            StatDefinition::Lifespan(stat) => stat.validate(),
        }
    }
}

impl From<HealthStat> for StatDefinition {
    fn from(stat: HealthStat) -> Self {
        StatDefinition::Health(stat)
    }
}

impl From<PositionStat> for StatDefinition {
    fn from(stat: PositionStat) -> Self {
        StatDefinition::Position(stat)
    }
}

impl From<LifespanStat> for StatDefinition {
    fn from(stat: LifespanStat) -> Self {
        StatDefinition::Lifespan(stat)
    }
}

fn invalid(kind: ComponentKind, reason: &'static str) -> ConstructError {
    ConstructError::InvalidStat { kind, reason }
}

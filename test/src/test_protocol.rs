//! Templates shared by every integration test

use facet_shared::{
    HealthStat, LifespanStat, ObjectTemplate, PositionStat, TemplateId, TemplateRegistry,
};

/// Health then Position
pub const SOLDIER: TemplateId = TemplateId::new(1);
/// Position then Lifespan
pub const FLARE: TemplateId = TemplateId::new(2);
/// Health only
pub const CRATE: TemplateId = TemplateId::new(3);

pub fn test_registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    let templates = [
        ObjectTemplate::new(SOLDIER, "soldier")
            .with_stat(HealthStat::new(100))
            .with_stat(PositionStat::default()),
        ObjectTemplate::new(FLARE, "flare")
            .with_stat(PositionStat::new(0.0, 10.0, 0.0))
            .with_stat(LifespanStat::new(0.5)),
        ObjectTemplate::new(CRATE, "crate").with_stat(HealthStat::new(50)),
    ];
    for template in templates {
        registry
            .register(template)
            .expect("test templates are valid");
    }
    registry
}

//! Integration test for the shipped script templates.
//!
//! `PlayerScript` below is what the basic-movement template renders to for
//! `Player`, so the rendered code is checked against the real API.

use std::sync::Arc;

use meridian::movement::{BasicMovement, BodyState, MovementInput, JUMP_VELOCITY, SPEED};
use meridian::prelude::*;
use meridian::templates::{builtin_templates, TemplateContext};
use meridian::variant::HostHeap;
use meridian::TemplateError;

export_properties! {
    /// Script attached to a `CharacterBody3D` node.
    struct PlayerScript {
        #[export] speed: Real = 5.0,
        #[export] jump_velocity: Real = 4.5,
    }
}

impl PlayerScript {
    fn physics_process(&self, body: &BodyState, input: MovementInput, delta: f64) -> Vector3 {
        let movement = BasicMovement {
            speed: self.speed,
            jump_velocity: self.jump_velocity,
        };
        movement.step(body, input, delta)
    }
}

#[test]
fn test_builtin_registry_contents() {
    let registry = builtin_templates().unwrap();
    let keys: Vec<String> = registry.iter().map(|t| t.key()).collect();
    assert_eq!(keys, ["CharacterBody3D/basic_movement", "Node/empty"]);

    let movement = registry.get("CharacterBody3D/basic_movement").unwrap();
    assert_eq!(movement.description(), "Classic movement for gravity games (FPS, TPS, ...)");
    assert!(!movement.body().contains("meta-"));
    assert!(registry.default_for("Node").unwrap().is_default());
}

#[test]
fn test_every_builtin_renders_cleanly() {
    let registry = builtin_templates().unwrap();
    for template in registry.iter() {
        let source = template
            .render(&TemplateContext::new("Player", template.base_class()))
            .unwrap();
        for placeholder in ["_BINDINGS_NAMESPACE_", "_CLASS_", "_BASE_"] {
            assert!(!source.contains(placeholder), "{} left {placeholder}", template.key());
        }
        assert!(source.contains("use meridian::prelude::*;"));
        assert!(source.contains("pub struct Player"));
    }
}

#[test]
fn test_rendered_movement_matches_script() {
    let registry = builtin_templates().unwrap();
    let source = registry
        .get("CharacterBody3D/basic_movement")
        .unwrap()
        .render(&TemplateContext::new("PlayerScript", "CharacterBody3D"))
        .unwrap();
    assert!(source.contains("#[export] speed: Real = 5.0,"));
    assert!(source.contains("#[export] jump_velocity: Real = 4.5,"));
    assert!(source.contains("pub const BASE_CLASS: &'static str = \"CharacterBody3D\";"));
    assert!(source.contains("movement.step(body, input, delta)"));
}

#[test]
fn test_render_rejects_empty_class() {
    let registry = builtin_templates().unwrap();
    let template = registry.get("Node/empty").unwrap();
    assert_eq!(
        template.render(&TemplateContext::new("", "Node")),
        Err(TemplateError::EmptyClassName)
    );
}

#[test]
fn test_script_defaults_match_movement_constants() {
    let heap = Arc::new(HostHeap::new());
    let rt = heap.runtime();

    let script = PlayerScript::default();
    let list = PlayerScript::property_list(&rt).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(Real::from_variant(&list[0].default).unwrap(), SPEED);
    assert_eq!(Real::from_variant(&list[1].default).unwrap(), JUMP_VELOCITY);
    assert_eq!(script.physics_process(&BodyState::grounded(), MovementInput::default(), 0.1), Vector3::ZERO);
}

#[test]
fn test_script_frame_sequence() {
    let mut script = PlayerScript::default();
    script.set_property("speed", &Variant::Float(2.0)).unwrap();

    let mut body = BodyState::grounded();
    let forward = MovementInput {
        direction: Vector2::new(0.0, -1.0),
        jump_pressed: true,
    };

    // Jump off the floor while running forward (-Z).
    body.velocity = script.physics_process(&body, forward, 1.0 / 60.0);
    assert_eq!(body.velocity, Vector3::new(0.0, JUMP_VELOCITY, -2.0));

    // Airborne: gravity pulls, no second jump, input released.
    body.on_floor = false;
    body.velocity = script.physics_process(&body, MovementInput::default(), 0.5);
    assert!((body.velocity.y - (JUMP_VELOCITY - 4.9)).abs() < 1e-5);
    assert_eq!(body.velocity.z, 0.0);

    // A yawed body turns the same input sideways.
    body.on_floor = true;
    body.basis = Basis::from_axis_angle(Vector3::UP, meridian::math::mathf::TAU / 4.0);
    let v = script.physics_process(&body, MovementInput { direction: Vector2::new(0.0, -1.0), jump_pressed: false }, 0.1);
    assert!((v.x - -2.0).abs() < 1e-5, "{v:?}");
    assert!(v.z.abs() < 1e-5);
}

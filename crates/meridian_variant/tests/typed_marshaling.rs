//! Integration test for typed conversions, typed collections and exported
//! properties.

use std::sync::Arc;

use meridian_math::{Color, Rid, Vector2, Vector3, Vector3i};
use meridian_variant::{
    export_properties, marshal_kind_of, variant_enum, HostHeap, MarshalKind, NodePath, ObjectRef, PropertyInfo,
    ScriptProperties, StringName, TypedArray, TypedDictionary, Variant, VariantArray, VariantDictionary, VariantError,
    VariantKind, VariantType,
};

variant_enum! {
    /// Movement mode.
    enum MoveMode {
        /// On the ground.
        Walk,
        /// Airborne.
        Fly,
        /// Ignores collisions.
        Noclip = 10,
    }
}

export_properties! {
    /// Exported fields of a player script.
    struct PlayerScript {
        #[export] speed: f64 = 5.0,
        #[export] jump_velocity: f32 = 4.5,
        #[export] display_name: String = String::from("Hero"),
        #[export] mode: MoveMode = MoveMode::Walk,
        #[export] spawn: Vector3i = Vector3i::BACK,
        #[export] tags: Vec<String> = vec![String::from("player")],
        frames_on_floor: u32 = 0,
    }
}

fn heap() -> Arc<HostHeap> {
    Arc::new(HostHeap::new())
}

#[test]
fn test_marshal_kind_selection() {
    assert_eq!(marshal_kind_of::<char>(), MarshalKind::Char);
    assert_eq!(marshal_kind_of::<Vec<u8>>(), MarshalKind::ByteArray);
    assert_eq!(marshal_kind_of::<Vec<ObjectRef>>(), MarshalKind::ObjectArray);
    assert_eq!(marshal_kind_of::<TypedDictionary<String, i64>>(), MarshalKind::TypedDictionary);
    assert_eq!(marshal_kind_of::<MoveMode>(), MarshalKind::Enum);
    assert_eq!(marshal_kind_of::<NodePath>(), MarshalKind::NodePath);
}

#[test]
fn test_u64_above_i64_is_rejected() {
    let heap = heap();
    let rt = heap.runtime();
    assert_eq!(
        u64::MAX.to_variant(&rt),
        Err(VariantError::OutOfRange { value: i128::from(u64::MAX), target: "i64" })
    );
    assert_eq!(u64::from_variant(&Variant::Int(5)).unwrap(), 5);
    assert_eq!(Variant::from_marshaled(&-3_i16, &rt).unwrap(), Variant::Int(-3));
    assert_eq!(Variant::Int(-3).to_marshaled::<i16>().unwrap(), -3);
}

#[test]
fn test_text_kinds_read_as_string() {
    let heap = heap();
    let rt = heap.runtime();
    let name = StringName::new(&rt, "idle").unwrap().to_variant(&rt).unwrap();
    assert_eq!(name.kind(), VariantKind::StringName);
    assert_eq!(String::from_variant(&name).unwrap(), "idle");
    assert_eq!(
        StringName::from_variant(&Variant::Int(0)),
        Err(VariantError::TypeMismatch { expected: VariantKind::StringName, found: VariantKind::Int })
    );
}

#[test]
fn test_packed_arrays() {
    let heap = heap();
    let rt = heap.runtime();
    {
        let points = vec![Vector3::ZERO, Vector3::UP, Vector3::new(1.0, 2.0, 3.0)];
        let variant = points.to_variant(&rt).unwrap();
        assert_eq!(variant.kind(), VariantKind::PackedVector3Array);
        assert_eq!(Vec::<Vector3>::from_variant(&variant).unwrap(), points);
        assert_eq!(
            Vec::<Vector2>::from_variant(&variant),
            Err(VariantError::TypeMismatch {
                expected: VariantKind::PackedVector2Array,
                found: VariantKind::PackedVector3Array,
            })
        );

        let colors = vec![Color::RED, Color::TRANSPARENT];
        assert_eq!(Vec::<Color>::from_variant(&colors.to_variant(&rt).unwrap()).unwrap(), colors);

        let bytes: Vec<u8> = (0..6).collect();
        assert_eq!(Vec::<u8>::from_variant(&bytes.to_variant(&rt).unwrap()).unwrap(), bytes);
    }
    assert_eq!(heap.stats().live, 0);
}

#[test]
fn test_element_arrays_become_untyped_arrays() {
    let heap = heap();
    let rt = heap.runtime();
    {
        let rids = vec![Rid::new(3), Rid::new(9)];
        let variant = rids.to_variant(&rt).unwrap();
        assert_eq!(variant.kind(), VariantKind::Array);
        assert_eq!(Vec::<Rid>::from_variant(&variant).unwrap(), rids);

        let nodes = vec![ObjectRef::new(&rt, "Node").unwrap(), ObjectRef::new(&rt, "Sprite2D").unwrap()];
        let variant = nodes.to_variant(&rt).unwrap();
        let back = Vec::<ObjectRef>::from_variant(&variant).unwrap();
        assert_eq!(back[1].class_name().unwrap(), "Sprite2D");
    }
    assert_eq!(heap.stats().live, 0);
}

#[test]
fn test_typed_collections() {
    let heap = heap();
    let rt = heap.runtime();
    {
        let scores: TypedArray<i32> = TypedArray::new(&rt).unwrap();
        scores.push(&10).unwrap();
        scores.push(&-4).unwrap();
        assert_eq!(scores.to_vec().unwrap(), vec![10, -4]);

        scores.as_untyped().push(Variant::Bool(true)).unwrap();
        assert_eq!(
            scores.get(2),
            Err(VariantError::TypeMismatch { expected: VariantKind::Int, found: VariantKind::Bool })
        );

        let roundtrip = TypedArray::<i32>::from_variant(&scores.to_variant(&rt).unwrap()).unwrap();
        assert_eq!(roundtrip.get(0).unwrap(), 10);
        assert_eq!(roundtrip.len().unwrap(), 3);

        let stock: TypedDictionary<String, u16> = TypedDictionary::new(&rt).unwrap();
        stock.insert(&String::from("potion"), &3).unwrap();
        stock.insert(&String::from("ether"), &1).unwrap();
        assert_eq!(stock.get(&String::from("potion")).unwrap(), Some(3));
        assert_eq!(stock.get(&String::from("elixir")).unwrap(), None);
        assert_eq!(stock.keys().unwrap(), vec![String::from("potion"), String::from("ether")]);
    }
    assert_eq!(heap.stats().live, 0);
}

#[test]
fn test_exported_property_list() {
    let heap = heap();
    let rt = heap.runtime();
    {
        let list = PlayerScript::property_list(&rt).unwrap();
        let names: Vec<&str> = list.iter().map(|p| p.name).collect();
        assert_eq!(names, ["speed", "jump_velocity", "display_name", "mode", "spawn", "tags"]);

        let mode: &PropertyInfo = &list[3];
        assert_eq!(mode.marshal_kind, MarshalKind::Enum);
        assert_eq!(mode.variant_kind, VariantKind::Int);
        assert_eq!(mode.default, Variant::Int(0));

        assert_eq!(list[0].default, Variant::Float(5.0));
        assert_eq!(list[4].default, Variant::Vector3i(Vector3i::BACK));
        assert_eq!(list[5].variant_kind, VariantKind::PackedStringArray);
        assert_eq!(String::from_variant(&list[2].default).unwrap(), "Hero");
    }
    assert_eq!(heap.stats().live, 0);
}

#[test]
fn test_exported_get_and_set() {
    let heap = heap();
    let rt = heap.runtime();
    {
        let mut script = PlayerScript::default();
        assert_eq!(script.frames_on_floor, 0);

        let renamed = String::from("Scout").to_variant(&rt).unwrap();
        script.set_property("display_name", &renamed).unwrap();
        script.set_property("mode", &Variant::Int(10)).unwrap();
        assert_eq!(script.display_name, "Scout");
        assert_eq!(script.mode, MoveMode::Noclip);

        assert_eq!(script.get_property("jump_velocity", &rt).unwrap(), Variant::Float(4.5));
        assert_eq!(
            script.set_property("mode", &Variant::Int(2)),
            Err(VariantError::OutOfRange { value: 2, target: "MoveMode" })
        );
        assert_eq!(
            script.get_property("frames_on_floor", &rt),
            Err(VariantError::UnknownProperty { name: "frames_on_floor".into() })
        );
    }
    assert_eq!(heap.stats().live, 0);
}

#[test]
fn test_copies_equal_their_source() {
    let heap = heap();
    let rt = heap.runtime();
    {
        let text = String::from("a").to_variant(&rt).unwrap();
        assert_eq!(text.clone(), text);
        assert_eq!(String::from("a").to_variant(&rt).unwrap(), text);
        assert_ne!(String::from("b").to_variant(&rt).unwrap(), text);

        let name = StringName::new(&rt, "idle").unwrap().to_variant(&rt).unwrap();
        assert_eq!(name.clone(), name);
        assert_ne!(name, text);

        let path = NodePath::new(&rt, "../Camera").unwrap().to_variant(&rt).unwrap();
        assert_eq!(path.clone(), path);

        let array = VariantArray::new(&rt).unwrap();
        array.push(Variant::Int(1)).unwrap();
        let array = Variant::Array(array);
        assert_eq!(array.clone(), array);
        assert_ne!(Variant::Array(VariantArray::new(&rt).unwrap()), array);

        let dict = Variant::Dictionary(VariantDictionary::new(&rt).unwrap());
        assert_eq!(dict.clone(), dict);

        let packed = vec![1.5_f32, 2.5].to_variant(&rt).unwrap();
        assert_eq!(packed.clone(), packed);

        let node = ObjectRef::new(&rt, "Node").unwrap();
        assert_eq!(node.clone(), node);
        assert_ne!(ObjectRef::new(&rt, "Node").unwrap(), node);
    }
    assert_eq!(heap.stats().live, 0);
}

#[test]
fn test_copies_from_different_heaps_differ() {
    let first = heap();
    let second = heap();
    let a = ObjectRef::new(&first.runtime(), "Node").unwrap();
    let b = ObjectRef::new(&second.runtime(), "Node").unwrap();
    assert_eq!(a.handle().raw(), b.handle().raw());
    assert_ne!(a, b);
}

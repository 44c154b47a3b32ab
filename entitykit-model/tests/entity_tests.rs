use entitykit_model::{EntityBase, EntityError, SaveContext};
use entitykit_types::{EntityId, Timestamp, UserId};

fn ctx() -> SaveContext {
    SaveContext {
        account: UserId::ANONYMOUS,
        request_time: Timestamp::from_secs(2_000),
        is_new: true,
    }
}

#[test]
fn new_base_is_unsaved() {
    let base = EntityBase::new("default", Timestamp::from_secs(1_000));
    assert_eq!(base.id(), None);
    assert_eq!(base.bundle(), "default");
    assert_eq!(base.created(), Timestamp::from_secs(1_000));
    assert_eq!(base.changed(), base.created());
}

#[test]
fn each_base_gets_its_own_uuid() {
    let a = EntityBase::new("default", Timestamp::from_secs(1));
    let b = EntityBase::new("default", Timestamp::from_secs(1));
    assert_ne!(a.uuid(), b.uuid());
}

#[test]
fn id_is_assigned_once() {
    let mut base = EntityBase::new("default", Timestamp::from_secs(1));
    assert!(base.assign_id(EntityId::new(1)));
    assert!(!base.assign_id(EntityId::new(2)));
    assert_eq!(base.id(), Some(EntityId::new(1)));
}

#[test]
fn created_is_fixed_after_first_save() {
    let mut base = EntityBase::new("default", Timestamp::from_secs(1));
    base.set_created(Timestamp::from_secs(5));
    assert_eq!(base.created(), Timestamp::from_secs(5));

    base.assign_id(EntityId::new(1));
    base.set_created(Timestamp::from_secs(9));
    assert_eq!(base.created(), Timestamp::from_secs(5));
}

#[test]
fn base_pre_save_accepts_bundle() {
    let mut base = EntityBase::new("default", Timestamp::from_secs(1));
    assert!(base.pre_save("thing", &ctx()).is_ok());
}

#[test]
fn base_pre_save_rejects_blank_bundle() {
    let mut base = EntityBase::new("  ", Timestamp::from_secs(1));
    match base.pre_save("thing", &ctx()) {
        Err(EntityError::MissingBundle(entity_type)) => assert_eq!(entity_type, "thing"),
        other => panic!("expected MissingBundle, got {other:?}"),
    }
}

#[test]
fn base_serde_roundtrip() {
    let mut base = EntityBase::new("default", Timestamp::from_secs(1));
    base.assign_id(EntityId::new(3));
    let json = serde_json::to_string(&base).unwrap();
    let back: EntityBase = serde_json::from_str(&json).unwrap();
    assert_eq!(base, back);
}

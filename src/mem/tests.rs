use super::*;

#[test]
fn test_entity_zero_is_reserved() {
    let mut a = Arena::new(1024);
    let e = a.locate(0).unwrap();
    assert_eq!(e.kind, Kind::Reserved);
    assert_eq!(e.sz, 0);
    assert_eq!(a.free(0).unwrap_err().code(), ErrorCode::Unregistered);
    assert_eq!(a.get(0, 0, 1).unwrap_err().code(), ErrorCode::Unregistered);
}

#[test]
fn test_put_get_is_bounded_by_entity() {
    let mut a = Arena::new(1024);
    let ent = a.allocate(8, Kind::String).unwrap();
    a.put(ent, 1, 4, &[1, 2, 3, 4]).unwrap();
    assert_eq!(a.get(ent, 1, 4).unwrap(), &[1, 2, 3, 4]);
    assert_eq!(a.get(ent, 0, 4).unwrap(), &[0, 0, 0, 0]);
    assert!(a.get(ent, 2, 4).is_err());
    assert!(a.put(ent, 2, 4, &[0; 4]).is_err());
}

#[test]
fn test_freed_entity_is_reused() {
    let mut a = Arena::new(1024);
    let first = a.allocate(16, Kind::Array).unwrap();
    a.put(first, 0, 16, &[9; 16]).unwrap();
    a.free(first).unwrap();
    assert_eq!(a.locate(first).unwrap_err().code(), ErrorCode::Unregistered);
    assert_eq!(a.stats().free_entities, 1);
    let second = a.allocate(8, Kind::Stack).unwrap();
    assert_eq!(second, first);
    assert_eq!(a.locate(second).unwrap().sz, 16);
    assert_eq!(a.stats().bytes_in_use, 16);
    assert_eq!(a.locate(second).unwrap().kind, Kind::Stack);
    assert_eq!(a.get(second, 0, 8).unwrap(), &[0; 8]);
    assert_eq!(a.stats().free_entities, 0);
}

#[test]
fn test_limit() {
    let mut a = Arena::new(32);
    a.allocate(32, Kind::Array).unwrap();
    let err = a.allocate(1, Kind::Array).unwrap_err();
    assert_eq!(err.code(), ErrorCode::VmError);
    assert_eq!(err.to_string(), "VMerror in allocate; arena limit reached");
}

#[test]
fn test_swap_entries_moves_storage_and_mark() {
    let mut a = Arena::new(1024);
    let x = a.gballoc(4, Kind::Array).unwrap();
    let y = a.gballoc(4, Kind::Array).unwrap();
    a.put(x, 0, 4, &[1; 4]).unwrap();
    a.put(y, 0, 4, &[2; 4]).unwrap();
    a.set_mark(x, Mark::new(1)).unwrap();
    a.swap_entries(x, y).unwrap();
    assert_eq!(a.get(x, 0, 4).unwrap(), &[2; 4]);
    assert_eq!(a.get(y, 0, 4).unwrap(), &[1; 4]);
    assert_eq!(a.locate(y).unwrap().mark.top_level(), 1);
    assert_eq!(a.locate(x).unwrap().mark.top_level(), 0);
    assert_eq!(a.stats().collectable, 2);
}

#[test]
fn test_copy_storage() {
    let mut a = Arena::new(1024);
    let x = a.allocate(4, Kind::Array).unwrap();
    let y = a.allocate(4, Kind::Array).unwrap();
    let small = a.allocate(2, Kind::Array).unwrap();
    a.put(x, 0, 4, &[5, 6, 7, 8]).unwrap();
    a.copy_storage(x, y).unwrap();
    assert_eq!(a.get(y, 0, 4).unwrap(), &[5, 6, 7, 8]);
    assert!(a.copy_storage(x, small).is_err());
}

#[test]
fn test_error_display() {
    assert_eq!(error!(RangeCheck).to_string(), "rangecheck");
    assert_eq!(
        error!(RangeCheck, "array_put").to_string(),
        "rangecheck in array_put"
    );
    assert_eq!(
        error!(InvalidAccess; "local value into global array").to_string(),
        "invalidaccess; local value into global array"
    );
}

#[test]
fn test_clamp_top_levels() {
    let mut a = Arena::new(1024);
    let x = a.allocate(4, Kind::Array).unwrap();
    let y = a.allocate(4, Kind::Array).unwrap();
    a.set_mark(x, Mark::new(3)).unwrap();
    a.set_mark(y, Mark::new(1)).unwrap();
    assert_eq!(a.clamp_top_levels(2), 1);
    assert_eq!(a.locate(x).unwrap().mark.top_level(), 2);
    assert_eq!(a.locate(x).unwrap().mark.local_level(), 3);
    assert_eq!(a.locate(y).unwrap().mark.top_level(), 1);
}

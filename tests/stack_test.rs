mod common;
use common::*;
use postvm::mach::{Object, Stack, SEGMENT_SIZE};
use postvm::mem::{Arena, ErrorCode};
use rand::{Rng, SeedableRng};

#[test]
fn test_push_25_pop_26() {
    init_logging();
    let mut arena = Arena::new(1 << 16);
    let s = Stack::init(&mut arena).unwrap();
    for i in 0..25 {
        s.push(&mut arena, Object::Integer(i)).unwrap();
    }
    assert_eq!(s.count(&arena).unwrap(), 25);
    let popped: Vec<Object> = (0..25).map(|_| s.pop(&mut arena).unwrap()).collect();
    assert_eq!(ints(&popped), (0..25).rev().collect::<Vec<i32>>());
    assert_eq!(
        s.pop(&mut arena).unwrap_err().code(),
        ErrorCode::StackUnderflow
    );
}

#[test]
fn test_random_operations_match_vec() {
    init_logging();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);
    let mut arena = Arena::new(1 << 20);
    let s = Stack::init(&mut arena).unwrap();
    let mut model: Vec<i32> = vec![];
    for step in 0..5000 {
        match rng.gen_range(0..10) {
            0..=4 => {
                s.push(&mut arena, Object::Integer(step)).unwrap();
                model.push(step);
            }
            5..=7 => match model.pop() {
                Some(v) => assert_eq!(s.pop(&mut arena).unwrap(), Object::Integer(v)),
                None => assert!(s.pop(&mut arena).is_err()),
            },
            8 if !model.is_empty() => {
                let i = rng.gen_range(0..model.len());
                assert_eq!(
                    s.top(&arena, i).unwrap(),
                    Object::Integer(model[model.len() - 1 - i])
                );
                assert_eq!(s.bot(&arena, i).unwrap(), Object::Integer(model[i]));
            }
            _ if !model.is_empty() => {
                let i = rng.gen_range(0..model.len());
                s.tob(&mut arena, i, Object::Integer(-step)).unwrap();
                model[i] = -step;
            }
            _ => {}
        }
        assert_eq!(s.count(&arena).unwrap(), model.len());
    }
    let rest: Vec<Object> = (0..model.len()).map(|_| s.pop(&mut arena).unwrap()).collect();
    model.reverse();
    assert_eq!(ints(&rest), model);
}

#[test]
fn test_stacks_share_an_arena() {
    init_logging();
    let mut arena = Arena::new(1 << 16);
    let os = Stack::init(&mut arena).unwrap();
    let es = Stack::init(&mut arena).unwrap();
    for i in 0..(SEGMENT_SIZE as i32 * 2) {
        os.push(&mut arena, Object::Integer(i)).unwrap();
        es.push(&mut arena, Object::Integer(-i)).unwrap();
    }
    assert_eq!(os.count(&arena).unwrap(), SEGMENT_SIZE * 2);
    assert_eq!(es.count(&arena).unwrap(), SEGMENT_SIZE * 2);
    es.free(&mut arena).unwrap();
    assert_eq!(os.top(&arena, 0).unwrap(), Object::Integer(SEGMENT_SIZE as i32 * 2 - 1));
    let again = Stack::init(&mut arena).unwrap();
    again.push(&mut arena, Object::Mark).unwrap();
    assert_eq!(os.bot(&arena, 0).unwrap(), Object::Integer(0));
    assert_eq!(again.pop(&mut arena).unwrap(), Object::Mark);
}

#[test]
fn test_dump_lists_bottom_to_top() {
    init_logging();
    let mut arena = Arena::new(1 << 16);
    let s = Stack::init(&mut arena).unwrap();
    s.push(&mut arena, Object::Boolean(true)).unwrap();
    s.push(&mut arena, Object::Real(2.5)).unwrap();
    s.push(&mut arena, Object::Mark).unwrap();
    assert_eq!(s.dump(&arena).unwrap(), "0:true\n1:2.5\n2:-mark-\n");
}

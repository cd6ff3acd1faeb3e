use super::*;
use crate::mem::{Arena, ErrorCode};


fn arena() -> Arena {
    Arena::new(1 << 20)
}

fn int(o: Object) -> i32 {
    match o {
        Object::Integer(i) => i,
        _ => panic!("not an integer: {}", o),
    }
}

fn filled_stack(arena: &mut Arena, n: i32) -> Stack {
    let s = Stack::init(arena).unwrap();
    for i in 0..n {
        s.push(arena, Object::Integer(i)).unwrap();
    }
    s
}

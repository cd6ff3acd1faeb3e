use postvm::mach::Object;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn ints(objects: &[Object]) -> Vec<i32> {
    objects
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i,
            _ => panic!("not an integer: {}", o),
        })
        .collect()
}

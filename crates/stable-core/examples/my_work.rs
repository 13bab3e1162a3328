use stable_core::{Work, create_stable_work};

/// 示范实现：与稳定边界另一侧独立演进的具体类型。
struct MyWork;

impl Work for MyWork {
    fn do_work(&self) {
        println!("Do something");
    }
}

fn create_my_work() -> Box<dyn Work> {
    Box::new(MyWork)
}

fn main() {
    let work = create_stable_work(create_my_work());
    work.do_work();
}

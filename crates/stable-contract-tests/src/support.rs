use std::any::Any;
use std::fmt::Write;
use std::panic;

/// 在附加“套件/用例”上下文的前提下重新抛出 panic。
///
/// 仅应在 `catch_unwind` 的错误分支中调用；函数不会正常返回。
pub fn panic_with_context(suite: &str, case: &str, payload: Box<dyn Any + Send>) -> ! {
    let mut message = String::new();
    let _ = write!(&mut message, "[stable-tck::{suite}::{case}] 测试失败：");
    let _ = write!(&mut message, "{}", payload_text(&*payload));
    panic::resume_unwind(Box::new(message));
}

/// 提取 panic 载荷中的文本，非字符串载荷返回占位说明。
pub fn payload_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&str>() {
        *text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.as_str()
    } else {
        "<未知 panic 类型>"
    }
}

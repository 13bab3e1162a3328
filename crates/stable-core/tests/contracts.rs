//! 以契约套件校验 `create_stable_work`。

use stable_contract_tests::stable_tck;

#[stable_tck(factory = stable_core::create_stable_work)]
mod create_stable_work_tck {}

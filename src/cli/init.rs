use serde_json::json;

use crate::db::connection;

pub fn run(json_output: bool) -> i32 {
    let result = connection::init_db().map(|path| {
        super::emit_success(
            json_output,
            json!({ "path": path.to_string_lossy() }),
            &[],
            || println!("Initialized tudoo at {}", path.display()),
        );
        0
    });
    super::finish(result, &[], json_output)
}

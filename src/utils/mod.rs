//! Small self-contained helpers: HTTP headers, byte cloning, indirection,
//! JSON parsing, string and path manipulation, filesystem and time.

pub mod bytes;
pub mod fs;
pub mod http;
pub mod indirect;
pub mod json;
pub mod paths;
pub mod strings;
pub mod time;
pub mod url;

pub use bytes::{clone_bytes, clone_reader, CloneError};
pub use fs::is_file_exist;
pub use self::http::{is_status_code_2xx, write_no_cache_headers};
pub use indirect::Indirect;
pub use json::{parse_json, JsonError};
pub use paths::{clean_path, map_params, trim_file_extension};
pub use strings::{ellipsis_string, rune_to_string, truncate_string};
pub use time::{compare_time_and_time_string, format_rfc1123, now_in_milli, to_seconds};
pub use self::url::{get_path_from_url, mask_password};

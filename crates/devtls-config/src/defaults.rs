//! Serde default functions for the config types.
//!
//! Each one returns the matching constant from `devtls_core::defaults`, so the
//! config file, the CLI and the library agree on file names and limits.

use std::path::PathBuf;

use devtls_core::defaults;

/// `name => CONST: Type` copies the constant; `name => CONST as String` owns a
/// `&str` constant; `name => CONST as PathBuf` turns it into a path.
macro_rules! defaults_from_core {
    (@one $fn_name:ident, $const_name:ident, $ty:ty) => {
        pub(crate) fn $fn_name() -> $ty {
            defaults::$const_name
        }
    };
    (@one $fn_name:ident, $const_name:ident; $owned:ident) => {
        pub(crate) fn $fn_name() -> $owned {
            $owned::from(defaults::$const_name)
        }
    };
    ($($fn_name:ident => $const_name:ident $(: $ty:ty)? $(as $owned:ident)?),* $(,)?) => {
        $(defaults_from_core!(@one $fn_name, $const_name $(, $ty)? $(; $owned)?);)*
    };
}

defaults_from_core! {
    default_overwrite    => DEFAULT_OVERWRITE: bool,
    default_validity_days => DEFAULT_VALIDITY_DAYS: u32,
    max_validity_days    => MAX_VALIDITY_DAYS: u32,
    default_key_file     => DEFAULT_KEY_FILE as String,
    default_request_file => DEFAULT_REQUEST_FILE as String,
    default_cert_file    => DEFAULT_CERT_FILE as String,
    default_target_dir   => DEFAULT_TARGET_DIR as PathBuf,
}

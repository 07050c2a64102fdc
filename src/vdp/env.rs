use super::Vdp;

/// Cached env-var flag: returns `true` when the env var is set (`.is_ok()`).
macro_rules! env_bool {
    ($name:ident, $var:expr) => {
        #[inline]
        pub(crate) fn $name() -> bool {
            use std::sync::OnceLock;
            static V: OnceLock<bool> = OnceLock::new();
            *V.get_or_init(|| std::env::var($var).is_ok())
        }
    };
}

// Render diagnostics only; nothing outside the raster path consults these.
impl Vdp {
    env_bool!(env_disable_bg, "SMS_DISABLE_BG");
    env_bool!(env_disable_sprites, "SMS_DISABLE_SPRITES");
    env_bool!(env_force_display_on, "SMS_FORCE_DISPLAY_ON");
}

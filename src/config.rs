// Compile-time configuration. Overrides come from the environment at build
// time; the baked defaults keep a plain `trunk serve` working.

#[cfg(debug_assertions)]
const DEFAULT_API_BASE: &str = "http://localhost:3001";

#[cfg(not(debug_assertions))]
const DEFAULT_API_BASE: &str = "https://cinderworks-backend.vercel.app";

const DEFAULT_HCAPTCHA_SITE_KEY: &str = "7f3d2c18-04b9-4a5e-9d31-52c60b8f11aa";

pub fn api_base() -> &'static str {
    match option_env!("CINDERWORKS_API_BASE") {
        Some(base) if !base.is_empty() => base,
        _ => DEFAULT_API_BASE,
    }
}

// An explicitly empty key disables the contact form's submit path; only an
// unset variable falls back to the baked default.
pub fn hcaptcha_site_key() -> &'static str {
    match option_env!("CINDERWORKS_HCAPTCHA_SITE_KEY") {
        Some(key) => key,
        None => DEFAULT_HCAPTCHA_SITE_KEY,
    }
}

use std::path::PathBuf;

pub fn default_cert() -> PathBuf {
    PathBuf::from("cert.pem")
}

pub fn default_key() -> PathBuf {
    PathBuf::from("key.pem")
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_host() -> String {
    "localhost".to_string()
}

pub fn default_source() -> PathBuf {
    PathBuf::from("./site")
}

pub fn default_output() -> PathBuf {
    PathBuf::from("./bin")
}

pub fn default_app_name() -> String {
    "Quizify".to_string()
}

pub fn default_tls() -> bool {
    true
}

pub fn default_shutdown_timeout_secs() -> u64 {
    5
}

pub fn default_bind_retries() -> u32 {
    3
}

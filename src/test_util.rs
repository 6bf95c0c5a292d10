#[cfg(test)]
pub(crate) fn with_temp_home<F, R>(func: F) -> R
where
    F: FnOnce(&std::path::Path) -> R,
{
    static HOME_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    let _guard = HOME_LOCK.lock().expect("home lock");
    let dir = tempfile::tempdir().expect("tempdir");
    let previous = std::env::var("HOME").ok();
    unsafe { std::env::set_var("HOME", dir.path()) };
    let result = func(dir.path());
    match previous {
        Some(home) => unsafe { std::env::set_var("HOME", home) },
        None => unsafe { std::env::remove_var("HOME") },
    }
    result
}

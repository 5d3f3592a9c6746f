//! Output width detection.

/// Width for usage text: `COLUMNS`, then the terminal on stdout, then 80.
pub fn width() -> usize {
    heatargs::usage_width(columns_from_env(std::env::var("COLUMNS").ok()).or_else(tty_columns))
}

fn columns_from_env(value: Option<String>) -> Option<usize> {
    value?.trim().parse().ok().filter(|w: &usize| *w > 0)
}

#[cfg(unix)]
nix::ioctl_read_bad!(window_size, nix::libc::TIOCGWINSZ, nix::libc::winsize);

#[cfg(unix)]
fn tty_columns() -> Option<usize> {
    let mut ws = nix::libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: `ws` is a valid, writable winsize for the duration of the call.
    let res = unsafe { window_size(nix::libc::STDOUT_FILENO, &mut ws) };
    match res {
        Ok(_) if ws.ws_col > 0 => Some(ws.ws_col as usize),
        _ => None,
    }
}

#[cfg(not(unix))]
fn tty_columns() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_env_parsing() {
        assert_eq!(columns_from_env(Some("120".into())), Some(120));
        assert_eq!(columns_from_env(Some(" 72 ".into())), Some(72));
        assert_eq!(columns_from_env(Some("0".into())), None);
        assert_eq!(columns_from_env(Some("wide".into())), None);
        assert_eq!(columns_from_env(None), None);
    }
}

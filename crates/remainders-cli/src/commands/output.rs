use colored::Colorize;

use remainders_application::ProfileSnapshot;
use remainders_core::config::AppConfig;

const NOT_SET: &str = "(not set)";

pub fn print_snapshot(snapshot: &ProfileSnapshot) {
    println!("{}", "Profile".bright_magenta().bold());
    for line in render_snapshot(snapshot) {
        println!("  {}", line);
    }

    match &snapshot.wallpaper_url {
        Some(url) => println!("  {:<12}{}", "URL:", url.bright_cyan()),
        None if snapshot.can_generate => println!(
            "  {:<12}{}",
            "URL:",
            "out of date, run generate".bright_black()
        ),
        None => println!(
            "  {:<12}{}",
            "URL:",
            format!("incomplete: {}", missing_fields(snapshot)).yellow()
        ),
    }
}

pub fn print_storage(config: &AppConfig) {
    let location = config
        .data_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "platform data directory".to_string());
    println!(
        "{}",
        format!("Saved as '{}' in {}", config.storage_key, location).bright_black()
    );
}

/// Plain-text rows for every field except the URL.
pub fn render_snapshot(snapshot: &ProfileSnapshot) -> Vec<String> {
    let birth_date = if snapshot.birth_date.is_empty() {
        NOT_SET.to_string()
    } else {
        snapshot.birth_date.clone()
    };
    let device = snapshot
        .device
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| NOT_SET.to_string());

    vec![
        format!("{:<12}{}", "View mode:", snapshot.view_mode),
        format!("{:<12}{}", "Birth date:", birth_date),
        format!("{:<12}{}", "Device:", device),
        format!(
            "{:<12}{}",
            "Complete:",
            if snapshot.can_generate { "yes" } else { "no" }
        ),
    ]
}

/// Describes what keeps the profile from being complete.
pub fn missing_fields(snapshot: &ProfileSnapshot) -> String {
    let mut missing = Vec::new();
    if snapshot.device.is_none() {
        missing.push("select a device");
    }
    if snapshot.view_mode.requires_birth_date() && snapshot.birth_date.is_empty() {
        missing.push("enter a birth date");
    }
    missing.join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use remainders_core::device::DeviceProfile;
    use remainders_core::profile::ViewMode;

    fn snapshot() -> ProfileSnapshot {
        ProfileSnapshot {
            birth_date: String::new(),
            device: None,
            view_mode: ViewMode::Life,
            can_generate: false,
            wallpaper_url: None,
            copied: false,
        }
    }

    #[test]
    fn test_missing_fields_life_mode() {
        assert_eq!(
            missing_fields(&snapshot()),
            "select a device and enter a birth date"
        );
    }

    #[test]
    fn test_missing_fields_year_mode_ignores_birth_date() {
        let snapshot = ProfileSnapshot {
            view_mode: ViewMode::Year,
            ..snapshot()
        };
        assert_eq!(missing_fields(&snapshot), "select a device");
    }

    #[test]
    fn test_render_snapshot() {
        let snapshot = ProfileSnapshot {
            birth_date: "1990-05-12".to_string(),
            device: Some(DeviceProfile::new("Apple", "iPhone 15", 1179, 2556).unwrap()),
            can_generate: true,
            ..snapshot()
        };

        let lines = render_snapshot(&snapshot);

        assert_eq!(lines[0], "View mode:  life");
        assert_eq!(lines[1], "Birth date: 1990-05-12");
        assert_eq!(lines[2], "Device:     Apple iPhone 15 (1179x2556)");
        assert_eq!(lines[3], "Complete:   yes");
    }
}

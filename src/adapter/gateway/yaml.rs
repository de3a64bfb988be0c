use crate::entity::schedule_config::ScheduleConfig;
use crate::entity::time_slot::{parse_slot_times, SlotTimes};
use chrono::Weekday;
use std::fs;
use std::path::Path;
use thiserror::Error;
use yaml_rust::{Yaml, YamlLoader};

#[cfg(test)]
use std::io::Write;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid yaml: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("invalid value for `{key}`: {value}")]
    InvalidValue { key: &'static str, value: String },
}

fn invalid(key: &'static str, yaml: &Yaml) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: format!("{:?}", yaml),
    }
}

fn read_weekday(s: &str) -> Option<Weekday> {
    match s {
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        "Sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn read_slot_times(
    yaml: &Yaml,
    key: &'static str,
    default: SlotTimes,
) -> Result<SlotTimes, ConfigError> {
    match &yaml[key] {
        Yaml::BadValue | Yaml::Null => Ok(default),
        Yaml::String(s) => parse_slot_times(s).ok_or_else(|| invalid(key, &yaml[key])),
        other => Err(invalid(key, other)),
    }
}

fn read_u32(yaml: &Yaml, key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match &yaml[key] {
        Yaml::BadValue | Yaml::Null => Ok(default),
        Yaml::Integer(n) => u32::try_from(*n).map_err(|_| invalid(key, &yaml[key])),
        other => Err(invalid(key, other)),
    }
}

// キーが存在しない場合はデフォルト値を使う。値が不正な場合はエラー
pub fn yaml_to_schedule_config(yaml: &Yaml) -> Result<ScheduleConfig, ConfigError> {
    let default = ScheduleConfig::default();

    let course_names = match &yaml["course_names"] {
        Yaml::BadValue | Yaml::Null => default.course_names.clone(),
        Yaml::Array(names) => {
            let mut course_names = vec![];
            for name in names.iter() {
                match name.as_str() {
                    Some(s) if !s.trim().is_empty() => course_names.push(s.trim().to_string()),
                    _ => return Err(invalid("course_names", name)),
                }
            }
            course_names
        }
        other => return Err(invalid("course_names", other)),
    };

    let off_days = match &yaml["off_days"] {
        Yaml::BadValue | Yaml::Null => default.off_days.clone(),
        Yaml::Array(days) => {
            let mut off_days = vec![];
            for day in days.iter() {
                match day.as_str().and_then(read_weekday) {
                    Some(weekday) => off_days.push(weekday),
                    None => return Err(invalid("off_days", day)),
                }
            }
            off_days
        }
        other => return Err(invalid("off_days", other)),
    };

    let min_seats = read_u32(yaml, "min_seats", default.min_seats)?;
    let max_seats = read_u32(yaml, "max_seats", default.max_seats)?;
    if min_seats > max_seats {
        return Err(ConfigError::InvalidValue {
            key: "max_seats",
            value: format!("{} is less than min_seats {}", max_seats, min_seats),
        });
    }

    Ok(ScheduleConfig {
        course_names,
        morning: read_slot_times(yaml, "morning", default.morning)?,
        evening: read_slot_times(yaml, "evening", default.evening)?,
        window_days: read_u32(yaml, "window_days", default.window_days)?,
        off_days,
        min_seats,
        max_seats,
    })
}

pub fn load_schedule_config_from_str(yaml_str: &str) -> Result<ScheduleConfig, ConfigError> {
    let docs = YamlLoader::load_from_str(yaml_str)?;

    // 空ファイルは全てデフォルト
    match docs.first() {
        Some(doc) => yaml_to_schedule_config(doc),
        None => Ok(ScheduleConfig::default()),
    }
}

pub fn load_schedule_config_from_file(path: &Path) -> Result<ScheduleConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config = load_schedule_config_from_str(&text)?;
    tracing::debug!(path = %path.display(), courses = config.course_names.len(), "loaded schedule config");

    Ok(config)
}

#[test]
fn test_load_schedule_config_from_str_キーが存在しない場合はデフォルト値になること() {
    let actual = load_schedule_config_from_str("window_days: 30\n").unwrap();
    let expected = ScheduleConfig {
        window_days: 30,
        ..ScheduleConfig::default()
    };
    assert_eq!(actual, expected);
}

#[test]
fn test_load_schedule_config_from_str_空文字列の場合() {
    let actual = load_schedule_config_from_str("").unwrap();
    assert_eq!(actual, ScheduleConfig::default());
}

#[test]
fn test_load_schedule_config_from_str_全てのキーを読めること() {
    let s = "
course_names:
  - 'IELTS Intensive'
  - 'Cambridge B2 First'
morning: '08:30 - 10:30'
evening: '19:00 - 21:00'
window_days: 14
off_days: ['Sat', 'Sun']
min_seats: 6
max_seats: 8
";

    let actual = load_schedule_config_from_str(s).unwrap();

    assert_eq!(
        actual.course_names,
        vec!["IELTS Intensive".to_string(), "Cambridge B2 First".to_string()]
    );
    assert_eq!(actual.morning, SlotTimes::from_hm(8, 30, 10, 30));
    assert_eq!(actual.evening, SlotTimes::from_hm(19, 0, 21, 0));
    assert_eq!(actual.window_days, 14);
    assert_eq!(actual.off_days, vec![Weekday::Sat, Weekday::Sun]);
    assert_eq!(actual.min_seats, 6);
    assert_eq!(actual.max_seats, 8);
}

#[test]
fn test_load_schedule_config_from_str_曜日が不正な場合はエラー() {
    let actual = load_schedule_config_from_str("off_days: ['Sunday']\n");
    assert!(matches!(
        actual,
        Err(ConfigError::InvalidValue { key: "off_days", .. })
    ));
}

#[test]
fn test_load_schedule_config_from_str_時刻が不正な場合はエラー() {
    let actual = load_schedule_config_from_str("morning: '9am'\n");
    assert!(matches!(
        actual,
        Err(ConfigError::InvalidValue { key: "morning", .. })
    ));
}

#[test]
fn test_load_schedule_config_from_str_席数の範囲が逆転している場合はエラー() {
    let actual = load_schedule_config_from_str("min_seats: 20\nmax_seats: 15\n");
    assert!(matches!(
        actual,
        Err(ConfigError::InvalidValue { key: "max_seats", .. })
    ));
}

#[test]
fn test_load_schedule_config_from_str_負の値はエラー() {
    let actual = load_schedule_config_from_str("window_days: -1\n");
    assert!(matches!(
        actual,
        Err(ConfigError::InvalidValue { key: "window_days", .. })
    ));
}

#[test]
fn test_load_schedule_config_from_str_yamlとして不正な場合() {
    let actual = load_schedule_config_from_str("course_names: [unclosed\n");
    assert!(matches!(actual, Err(ConfigError::Yaml(_))));
}

#[test]
fn test_load_schedule_config_from_file_ファイルから読めること() {
    let path = std::env::temp_dir().join(format!("class_booking_{}.yaml", uuid::Uuid::new_v4()));
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(b"window_days: 7\noff_days: []\n").unwrap();

    let actual = load_schedule_config_from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(actual.window_days, 7);
    assert!(actual.off_days.is_empty());
}

#[test]
fn test_load_schedule_config_from_file_ファイルが存在しない場合() {
    let path = std::env::temp_dir().join("class_booking_missing_config.yaml");
    let actual = load_schedule_config_from_file(&path);

    assert!(matches!(actual, Err(ConfigError::Read { .. })));
}

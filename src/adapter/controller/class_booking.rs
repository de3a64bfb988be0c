use chrono::{Local, NaiveDate};
use class_booking::adapter::gateway::log_notifier::LogNotifier;
use class_booking::adapter::gateway::yaml::load_schedule_config_from_file;
use class_booking::application::booking_desk::BookingDesk;
use class_booking::application::interface::BookingNotifierTrait;
use class_booking::application::show_class_schedules::{
    daily_heading, empty_day_message, selection_summary, show_class_schedules,
};
use class_booking::application::submit_booking::{SubmitError, ValidationError};
use class_booking::entity::class_schedule::ScheduleId;
use class_booking::entity::contact::ContactFields;
use class_booking::entity::datetime::{format_date_key, parse_date};
use class_booking::entity::schedule_config::ScheduleConfig;
use regex::Regex;
use std::env;
use std::error::Error;
use std::io::{stdin, stdout, Lines, StdinLock, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "class_booking>";

#[derive(Debug, PartialEq)]
enum Command {
    Dates,
    Date(NaiveDate),
    ClearDate,
    List,
    Select(ScheduleId),
    Reset,
    Summary,
    Book,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(untrimmed_line: &str) -> Command {
    // 整形
    let re = Regex::new(r"\s+").expect("whitespace pattern is valid");
    let line: String = re.replace_all(untrimmed_line, " ").trim().to_string();

    let tokens: Vec<&str> = line.split(' ').collect();
    match tokens[0] {
        "dates" | "ds" => Command::Dates,
        "date" | "d" => match tokens.get(1) {
            None => Command::ClearDate,
            Some(s) => match parse_date(s) {
                Some(date) => Command::Date(date),
                None => Command::Unknown(line.clone()),
            },
        },
        "list" | "ls" | "" => Command::List,
        "select" | "sel" => match tokens.get(1) {
            Some(id) => Command::Select(ScheduleId::from(*id)),
            None => Command::Unknown(line.clone()),
        },
        "reset" => Command::Reset,
        "summary" => Command::Summary,
        "book" => Command::Book,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.clone()),
    }
}

#[test]
fn test_parse_command_日付の指定() {
    assert_eq!(
        parse_command("date   2024-01-09 "),
        Command::Date(parse_date("2024-01-09").unwrap())
    );
    assert_eq!(parse_command("date"), Command::ClearDate);
    assert_eq!(
        parse_command("date tomorrow"),
        Command::Unknown("date tomorrow".to_string())
    );
}

#[test]
fn test_parse_command_授業の選択() {
    assert_eq!(
        parse_command("sel ielts-intensive-2024-01-01-am"),
        Command::Select(ScheduleId::from("ielts-intensive-2024-01-01-am"))
    );
    assert_eq!(parse_command("select"), Command::Unknown("select".to_string()));
}

#[test]
fn test_parse_command_空行は一覧表示() {
    assert_eq!(parse_command("   "), Command::List);
    assert_eq!(parse_command("q"), Command::Quit);
}

fn prompt_field(
    lines: &mut Lines<StdinLock<'static>>,
    label: &str,
) -> Result<String, Box<dyn Error>> {
    print!("{}: ", label);
    stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(line?.trim_end().to_string()),
        None => Ok(String::new()),
    }
}

fn read_contact(lines: &mut Lines<StdinLock<'static>>) -> Result<ContactFields, Box<dyn Error>> {
    let name = prompt_field(lines, "Full Name")?;
    let email = prompt_field(lines, "Email Address")?;
    let phone = prompt_field(lines, "Phone Number (Optional)")?;
    let message = prompt_field(lines, "Your Message")?;

    Ok(ContactFields::new(&name, &email, Some(&phone), &message))
}

fn print_listings(desk: &BookingDesk) {
    println!("{}", daily_heading(desk.get_selection()));

    let listings = show_class_schedules(desk);
    if listings.is_empty() {
        println!("  {}", empty_day_message(desk.get_selection()));
        return;
    }

    for listing in listings.iter() {
        println!(
            "  [{}] {}\t{}\t{}\t{}",
            listing.button, listing.course_name, listing.time, listing.seats, listing.id
        );
    }
}

fn print_submit_error(err: &SubmitError) {
    match err {
        SubmitError::Invalid(errors) => {
            for error in errors.iter() {
                match error {
                    ValidationError::Field(field_error) => {
                        println!("  {}: {}", field_error.field_name(), field_error);
                    }
                    ValidationError::MissingSelection => {
                        println!("  {}", error);
                    }
                }
            }
        }
        SubmitError::NotDelivered(_) => {
            println!("  {}", err);
        }
    }
}

// 終了する場合はfalseを返す
fn execute(
    desk: &mut BookingDesk,
    notifier: &mut dyn BookingNotifierTrait,
    lines: &mut Lines<StdinLock<'static>>,
    command: Command,
) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Dates => {
            let dates: Vec<String> = desk.event_dates().into_iter().map(format_date_key).collect();
            println!("{}", dates.join(" "));
        }
        Command::Date(date) => match desk.choose_date(date) {
            Ok(()) => print_listings(desk),
            Err(err) => println!("{}", err),
        },
        Command::ClearDate => {
            desk.clear_date();
            print_listings(desk);
        }
        Command::List => print_listings(desk),
        Command::Select(id) => match desk.choose_session(&id) {
            Ok(()) => println!("{}", selection_summary(desk)),
            Err(err) => println!("{}", err),
        },
        Command::Reset => {
            desk.reset();
            println!("{}", selection_summary(desk));
        }
        Command::Summary => println!("{}", selection_summary(desk)),
        Command::Book => {
            if desk.selected_session().is_none() {
                // フォームを開く前に授業を選ばせる
                println!("{}", ValidationError::MissingSelection);
                return Ok(true);
            }

            let contact = read_contact(lines)?;
            match desk.submit(&contact, notifier) {
                Ok(request) => println!("Booking Request Sent! ({})", request.get_request_id()),
                Err(err) => print_submit_error(&err),
            }
        }
        Command::Help => {
            println!("dates | date [YYYY-MM-DD] | list | select <id> | reset | summary | book | quit");
        }
        Command::Quit => return Ok(false),
        Command::Unknown(line) => println!("unknown command: {}", line),
    }

    Ok(true)
}

fn application(
    desk: &mut BookingDesk,
    notifier: &mut dyn BookingNotifierTrait,
) -> Result<(), Box<dyn Error>> {
    desk.generate(&mut rand::thread_rng());
    print_listings(desk);

    let mut lines = stdin().lines();
    loop {
        print!("{} ", PROMPT);
        stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        if !execute(desk, notifier, &mut lines, parse_command(&line))? {
            break;
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => load_schedule_config_from_file(Path::new(path))?,
        None => ScheduleConfig::default(),
    };

    let mut desk = BookingDesk::new(Local::now().date_naive(), config);
    let mut notifier = LogNotifier::new();

    // controllerで実体を見るのを避けるために、1つ関数を切る
    application(&mut desk, &mut notifier)?;

    tracing::info!(sent = notifier.get_sent(), "bye");
    Ok(())
}

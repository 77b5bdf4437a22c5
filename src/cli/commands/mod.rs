use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("biglietto")
        .about("Event ticketing client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the ticketing service API")
                .default_value("http://localhost:8081/api")
                .env("BIGLIETTO_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory for the persisted credential (default: $HOME/.biglietto)")
                .env("BIGLIETTO_DATA_DIR")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("BIGLIETTO_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account on the remote service")
                .arg(
                    Arg::new("first-name")
                        .long("first-name")
                        .help("First name")
                        .required(true),
                )
                .arg(
                    Arg::new("last-name")
                        .long("last-name")
                        .help("Last name")
                        .required(true),
                )
                .arg(Arg::new("phone").long("phone").help("Phone number").default_value(""))
                .arg(Arg::new("email").long("email").help("Email address").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Password")
                        .env("BIGLIETTO_PASSWORD")
                        .required(true),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .help("Account role: ADMIN, ORGANIZER or ATTENDEE")
                        .required(true),
                )
                .arg(
                    Arg::new("organization")
                        .long("organization")
                        .help("Organization name (organizer accounts)"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and persist the issued credential")
                .arg(Arg::new("email").long("email").help("Email address").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Password")
                        .env("BIGLIETTO_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Discard the persisted credential"))
        .subcommand(
            Command::new("events")
                .about("Browse the event catalog")
                .arg(
                    Arg::new("manage")
                        .long("manage")
                        .help("Open the management view (organizers and admins)")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("status").about("Show session and service status"))
}

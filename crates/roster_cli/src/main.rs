//! Command-line controller for the roster core.
//!
//! # Responsibility
//! - Translate arguments into `RosterCommand`s on a logged-in session.
//! - Render roster state and attendance statistics as plain text.
//!
//! Every subcommand except `ping` opens the store under `--data-dir` and
//! requires valid credentials.

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use roster_core::db::open_db;
use roster_core::{
    init_logging, AttendanceStatus, CoreConfig, DateRange, PersonRole, RecordStore,
    RosterCommand, RosterService, SqliteRecordStore, UserRole,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Club roster and attendance tracker")]
#[command(version)]
struct Cli {
    /// Directory holding the roster store and logs
    #[arg(long, env = "ROSTER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log directory (defaults to <data-dir>/logs)
    #[arg(long, env = "ROSTER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    log_level: Option<String>,

    #[arg(short, long, env = "ROSTER_USERNAME")]
    username: Option<String>,

    #[arg(short, long, env = "ROSTER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check core linkage
    Ping,
    /// Print seasons, teams and people (and users for admins)
    Show,
    AddSeason {
        name: String,
    },
    RenameSeason {
        season_id: String,
        name: String,
    },
    DeleteSeason {
        season_id: String,
    },
    /// Select the season used for attendance and statistics
    UseSeason {
        season_id: String,
    },
    AddTeam {
        season_id: String,
        name: String,
    },
    DeleteTeam {
        season_id: String,
        team_id: String,
    },
    AddPerson {
        season_id: String,
        team_id: String,
        name: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Player)]
        role: RoleArg,
    },
    DeletePerson {
        season_id: String,
        team_id: String,
        person_id: String,
    },
    AddUser {
        new_username: String,
        new_password: String,
        #[arg(long, value_enum, default_value_t = UserRoleArg::Coach)]
        role: UserRoleArg,
    },
    /// Omit --new-password or --role to keep the current value
    UpdateUser {
        user_id: String,
        new_username: String,
        #[arg(long, default_value = "")]
        new_password: String,
        #[arg(long, value_enum)]
        role: Option<UserRoleArg>,
    },
    DeleteUser {
        user_id: String,
    },
    /// Set one attendance mark
    Mark {
        date: String,
        person_id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Attendance totals for the active (or given) season
    Stats {
        #[arg(long)]
        season: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    Player,
    Coach,
}

impl From<RoleArg> for PersonRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Player => PersonRole::Player,
            RoleArg::Coach => PersonRole::Coach,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UserRoleArg {
    Admin,
    Coach,
}

impl From<UserRoleArg> for UserRole {
    fn from(value: UserRoleArg) -> Self {
        match value {
            UserRoleArg::Admin => UserRole::Admin,
            UserRoleArg::Coach => UserRole::Coach,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    Present,
    Absent,
    Justified,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Present => AttendanceStatus::Present,
            StatusArg::Absent => AttendanceStatus::Absent,
            StatusArg::Justified => AttendanceStatus::Justified,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if matches!(cli.command, Command::Ping) {
        println!("roster_core ping={}", roster_core::ping());
        println!("roster_core version={}", roster_core::core_version());
        return Ok(());
    }

    let data_dir = cli
        .data_dir
        .ok_or("--data-dir (or ROSTER_DATA_DIR) is required")?;
    let mut config = CoreConfig::new(data_dir);
    if let Some(log_dir) = cli.log_dir {
        config = config.with_log_dir(log_dir);
    }
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    config.validate().map_err(|err| err.to_string())?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = open_db(config.database_path()).map_err(|err| err.to_string())?;
    let mut service = RosterService::open(SqliteRecordStore::new(&conn));

    let username = cli.username.ok_or("--username is required")?;
    let password = cli.password.ok_or("--password is required")?;
    service
        .login(&username, &password)
        .map_err(|err| err.to_string())?;

    let command = match cli.command {
        Command::Ping => return Ok(()),
        Command::Show => {
            print_roster(&service);
            return Ok(());
        }
        Command::Stats { season, from, to } => {
            let range = DateRange::new(from.as_deref(), to.as_deref())
                .map_err(|err| err.to_string())?;
            return print_stats(&service, season.as_deref(), &range);
        }
        Command::AddSeason { name } => RosterCommand::AddSeason { name },
        Command::RenameSeason { season_id, name } => {
            RosterCommand::UpdateSeason { season_id, name }
        }
        Command::DeleteSeason { season_id } => RosterCommand::DeleteSeason { season_id },
        Command::UseSeason { season_id } => RosterCommand::SetActiveSeason { season_id },
        Command::AddTeam { season_id, name } => RosterCommand::AddTeam { season_id, name },
        Command::DeleteTeam { season_id, team_id } => {
            RosterCommand::DeleteTeam { season_id, team_id }
        }
        Command::AddPerson {
            season_id,
            team_id,
            name,
            role,
        } => RosterCommand::AddPerson {
            season_id,
            team_id,
            name,
            role: role.into(),
        },
        Command::DeletePerson {
            season_id,
            team_id,
            person_id,
        } => RosterCommand::DeletePerson {
            season_id,
            team_id,
            person_id,
        },
        Command::AddUser {
            new_username,
            new_password,
            role,
        } => RosterCommand::AddUser {
            username: new_username,
            password: new_password,
            role: role.into(),
        },
        Command::UpdateUser {
            user_id,
            new_username,
            new_password,
            role,
        } => update_user_command(&service, user_id, new_username, new_password, role),
        Command::DeleteUser { user_id } => RosterCommand::DeleteUser { user_id },
        Command::Mark {
            date,
            person_id,
            status,
        } => RosterCommand::SetAttendance {
            date,
            person_id,
            status: status.into(),
        },
    };

    let outcome = service.execute_authorized(command).map_err(|err| {
        error!("event=cli_command module=cli status=error error={err}");
        err.to_string()
    })?;
    match (outcome.changes.is_empty(), outcome.created_id) {
        (true, _) => println!("nothing changed"),
        (false, Some(id)) => println!("created {id}"),
        (false, None) => println!("saved {}", outcome.changes),
    }
    Ok(())
}

/// Builds an `UpdateUser` that keeps the stored role unless one is given.
fn update_user_command<S: RecordStore>(
    service: &RosterService<S>,
    user_id: String,
    username: String,
    password: String,
    role: Option<UserRoleArg>,
) -> RosterCommand {
    let role = role
        .map(UserRole::from)
        .or_else(|| service.state().find_user(&user_id).map(|user| user.role))
        .unwrap_or(UserRole::Coach);
    RosterCommand::UpdateUser {
        user_id,
        username,
        password,
        role,
    }
}

fn print_roster<S: RecordStore>(service: &RosterService<S>) {
    let state = service.state();
    let active_id = state.active_season_id.as_deref();
    for season in &state.seasons {
        let marker = if Some(season.id.as_str()) == active_id { "*" } else { " " };
        println!("{marker} {} [{}]", season.name, season.id);
        for team in &season.teams {
            println!(
                "    {} [{}] coaches={} players={}",
                team.name,
                team.id,
                team.count_role(PersonRole::Coach),
                team.count_role(PersonRole::Player)
            );
            for person in &team.people {
                println!("        {} ({}) [{}]", person.name, person.role.as_str(), person.id);
            }
        }
    }

    if service.session().is_admin() {
        println!("users:");
        for user in &state.users {
            println!("    {} ({}) [{}]", user.username, user.role.as_str(), user.id);
        }
    }
}

fn print_stats<S: RecordStore>(
    service: &RosterService<S>,
    season_id: Option<&str>,
    range: &DateRange,
) -> Result<(), String> {
    let teams = service
        .season_attendance(season_id, range)
        .ok_or("no such season (and no active season selected)")?;
    for team in teams {
        println!(
            "{} present={} absent={} justified={} rate={}",
            team.name,
            team.totals.present,
            team.totals.absent,
            team.totals.justified,
            format_rate(team.totals.attendance_rate())
        );
        for person in team.people {
            println!(
                "    {:<24} present={} absent={} justified={} rate={}",
                person.name,
                person.tally.present,
                person.tally.absent,
                person.tally.justified,
                format_rate(person.tally.attendance_rate())
            );
        }
    }
    Ok(())
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "-".to_string(), |rate| format!("{:.0}%", rate * 100.0))
}

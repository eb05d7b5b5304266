//! Line-oriented command language shared by `session` and `simulate`.
//!
//! ```text
//! enable <mode> [duration]    duration: 90, 90s, 15m, 2h (default from config)
//! disable <mode>
//! toggle <mode>
//! extend <mode> [duration]    default: config extend step
//! pause <mode> | resume <mode>
//! tick [n]                    simulate only: n one-second ticks
//! status | help | quit
//! ```

use modeshift_core::{
    checked_duration, Event, LifecycleConfig, ManualClock, ModeId, ProfileEngine, Snapshot,
};

pub const HELP: &str = "\
commands:
  enable <mode> [duration]   enable or restart a mode (duration: 90, 90s, 15m, 2h)
  disable <mode>             turn a mode off
  toggle <mode>              enable with the default duration, or disable
  extend <mode> [duration]   add time to an active mode
  pause <mode>               freeze a mode's countdown
  resume <mode>              continue a paused countdown
  tick [n]                   advance the virtual clock n seconds (simulate only)
  status                     show active modes
  help                       show this text
  quit                       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Enable { mode: ModeId, secs: Option<i64> },
    Disable { mode: ModeId },
    Toggle { mode: ModeId },
    Extend { mode: ModeId, secs: Option<i64> },
    Pause { mode: ModeId },
    Resume { mode: ModeId },
    Tick { count: u64 },
    Status,
    Help,
    Quit,
}

/// What a command produced, for the caller to render.
#[derive(Debug)]
pub enum Reply {
    Events(Vec<Event>),
    Status(Snapshot),
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let mode = || -> Result<ModeId, String> {
        args.first()
            .map(|m| ModeId::from(*m))
            .ok_or_else(|| format!("'{verb}' needs a mode id"))
    };
    let secs = || -> Result<Option<i64>, String> {
        args.get(1).map(|raw| parse_duration(raw)).transpose()
    };

    let max_args = match verb {
        "enable" | "extend" => 2,
        "disable" | "off" | "toggle" | "pause" | "resume" | "tick" => 1,
        "status" | "ls" | "help" | "?" | "quit" | "exit" => 0,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    if args.len() > max_args {
        return Err(format!("too many arguments for '{verb}'"));
    }

    let cmd = match verb {
        "enable" => ShellCommand::Enable {
            mode: mode()?,
            secs: secs()?,
        },
        "disable" | "off" => ShellCommand::Disable { mode: mode()? },
        "toggle" => ShellCommand::Toggle { mode: mode()? },
        "extend" => ShellCommand::Extend {
            mode: mode()?,
            secs: secs()?,
        },
        "pause" => ShellCommand::Pause { mode: mode()? },
        "resume" => ShellCommand::Resume { mode: mode()? },
        "tick" => {
            let count = match args.first() {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid tick count '{raw}'"))?,
                None => 1,
            };
            ShellCommand::Tick { count }
        }
        "status" | "ls" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        _ => ShellCommand::Quit,
    };
    Ok(Some(cmd))
}

/// Parse `90`, `90s`, `15m`, `2h` into signed seconds.
///
/// Sign is preserved so the engine can report non-positive values itself.
pub fn parse_duration(raw: &str) -> Result<i64, String> {
    let (number, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], c),
        _ => (raw, 's'),
    };
    let value: i64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{raw}'"))?;
    let factor = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        _ => return Err(format!("invalid duration unit in '{raw}'")),
    };
    value
        .checked_mul(factor)
        .ok_or_else(|| format!("duration '{raw}' is too large"))
}

/// Executes parsed commands against an engine.
pub struct Shell {
    engine: ProfileEngine,
    lifecycle: LifecycleConfig,
    /// Present only when the shell owns a virtual clock (simulate).
    clock: Option<ManualClock>,
}

impl Shell {
    pub fn new(engine: ProfileEngine, lifecycle: LifecycleConfig) -> Self {
        Self {
            engine,
            lifecycle,
            clock: None,
        }
    }

    pub fn with_manual_clock(mut self, clock: ManualClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn engine(&self) -> &ProfileEngine {
        &self.engine
    }

    pub fn handle(&self, line: &str) -> Result<Option<Reply>, Box<dyn std::error::Error>> {
        match parse(line)? {
            Some(cmd) => self.execute(cmd).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&self, cmd: ShellCommand) -> Result<Reply, Box<dyn std::error::Error>> {
        let engine = &self.engine;
        let event = match cmd {
            ShellCommand::Enable { mode, secs } => {
                let secs = match secs {
                    Some(s) => checked_duration(s)?,
                    None => self.lifecycle.default_duration_secs,
                };
                engine.enable(&mode, secs)?
            }
            ShellCommand::Disable { mode } => engine.disable(&mode)?,
            ShellCommand::Toggle { mode } => {
                engine.toggle(&mode, self.lifecycle.default_duration_secs)?
            }
            ShellCommand::Extend { mode, secs } => {
                let secs = match secs {
                    Some(s) => checked_duration(s)?,
                    None => self.lifecycle.extend_step_secs,
                };
                engine.extend(&mode, secs)?
            }
            ShellCommand::Pause { mode } => engine.pause(&mode)?,
            ShellCommand::Resume { mode } => engine.resume(&mode)?,
            ShellCommand::Tick { count } => return self.tick(count),
            ShellCommand::Status => return Ok(Reply::Status(engine.snapshot())),
            ShellCommand::Help => return Ok(Reply::Help),
            ShellCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Events(event.into_iter().collect()))
    }

    fn tick(&self, count: u64) -> Result<Reply, Box<dyn std::error::Error>> {
        let clock = self
            .clock
            .as_ref()
            .ok_or("'tick' is only available in simulate; the session clock runs on its own")?;

        let mut events = Vec::new();
        for _ in 0..count {
            clock.advance_secs(1);
            events.extend(self.engine.tick());
        }
        Ok(Reply::Events(events))
    }
}

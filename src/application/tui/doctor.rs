use crate::application::Config;
use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use std::io::{self, Write, stdout};

/// Print resolved paths and check the terminal can host the widget
pub fn run_doctor(config: &Config) -> io::Result<()> {
    println!("Mood directory: {}", config.mood_dir.display());
    println!("Data directory: {}", config.data_dir.display());
    println!("Backend:        {}", config.backend.as_str());
    println!("Log file:       {}", config.log_file().display());
    println!("Log level:      {}", config.log_level);
    println!();

    check_terminal()
}

pub fn check_terminal() -> io::Result<()> {
    println!("Testing terminal capabilities...");

    if IsTty::is_tty(&stdout()) {
        println!("✓ Running in a TTY");
    } else {
        println!("✗ Not running in a TTY");
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Terminal interface requires a TTY",
        ));
    }

    print!("Testing raw mode... ");
    enable_raw_mode()?;
    println!("✓ Raw mode enabled");

    print!("Testing alternate screen... ");
    alternate_screen_round_trip(&mut stdout(), disable_raw_mode)?;
    println!("✓ Alternate screen works, terminal restored");

    Ok(())
}

/// Enter and leave the alternate screen, then run `restore` whatever happened.
fn alternate_screen_round_trip<W, R>(out: &mut W, restore: R) -> io::Result<()>
where
    W: Write,
    R: FnOnce() -> io::Result<()>,
{
    let switched = out
        .execute(EnterAlternateScreen)
        .and_then(|out| out.execute(LeaveAlternateScreen).map(|_| ()));
    restore()?;
    switched
}

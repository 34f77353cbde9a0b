use crate::infrastructure::{WriteContext, WriteHook, WriteKind};
use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;

/// Appends one line per persisted write to `write_log.txt` in the mood directory
pub struct WriteLogHook;

impl WriteHook for WriteLogHook {
    fn on_write(&self, context: &WriteContext) -> Result<()> {
        let log_path = context.mood_dir.join("write_log.txt");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let action = match context.kind {
            WriteKind::Set => "set",
            WriteKind::Delete => "delete",
        };

        writeln!(
            file,
            "[{}] {} {} - Path: {} - Content length: {} characters",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            action,
            context.key,
            context.path.display(),
            context.content_len
        )?;

        Ok(())
    }

    fn name(&self) -> &str {
        "Write Log"
    }
}

use std::io::Write;

const BELL: &str = "\x07";

/// Flourish shown when something reaches completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Celebration {
    /// A goal reached 100%.
    Confetti,
    /// A task was marked complete.
    Stars,
}

impl Celebration {
    pub fn banner(&self, subject: &str) -> String {
        match self {
            Celebration::Confetti => format!("🎉 🎊 🎉  Goal reached: {subject}!  🎉 🎊 🎉"),
            Celebration::Stars => format!("⭐ ✨ ⭐  Task complete: {subject}!  ⭐ ✨ ⭐"),
        }
    }
}

/// Writes the banner on its own line; a bell follows when sound is enabled.
pub fn write_celebration<W: Write>(
    kind: Celebration,
    subject: &str,
    sound_enabled: bool,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", kind.banner(subject))?;
    if sound_enabled {
        write!(out, "{BELL}")?;
    }
    out.flush()
}

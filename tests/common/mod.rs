use assert_cmd::Command;

pub fn tebucks_offline() -> Command {
    let mut cmd = Command::cargo_bin("tebucks").unwrap();
    cmd.arg("--offline");
    cmd
}

/// Joins menu inputs into a stdin script, one entry per line.
pub fn script(lines: &[&str]) -> String {
    let mut joined = lines.join("\n");
    joined.push('\n');
    joined
}

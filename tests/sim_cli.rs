use std::path::PathBuf;
use std::process::Command;

fn scratch(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mips-sim-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn prints_final_state() {
    // lw $t0, 0($zero) ; add $t1, $t0, $t0 ; sw $t1, 4($zero)
    let program = scratch("prog.words", "2349334528\n17319968\n2886270980\n");
    let memory = scratch("mem.txt", "0-21\n");

    let res = Command::new(env!("CARGO_BIN_EXE_mips-sim"))
        .arg(&program)
        .arg(&memory)
        .output()
        .unwrap();
    assert!(res.status.success(), "{}", String::from_utf8_lossy(&res.stderr));

    let out = String::from_utf8(res.stdout).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("Cycles: "));
    assert_eq!(lines[1], "Instructions: 3");
    assert_eq!(lines[3], "Register file: ");
    assert_eq!(lines[5], "21 42 0 0 0 0 0 0 ");
    assert_eq!(lines[9], "Memory: ");
    assert!(lines[10].starts_with("21 42 0 "));
    assert_eq!(lines[10].split_whitespace().count(), 5000);
    // 20 rows of 5000 words, then a blank line
    assert_eq!(lines.len(), 31);
    assert_eq!(lines[30], "");
}

#[test]
fn forwarding_saves_cycles() {
    let program = scratch("fwd.words", "2349334528\n17319968\n2886270980\n");
    let memory = scratch("fwd-mem.txt", "0-21\n");
    let cycles = |extra: &[&str]| {
        let res = Command::new(env!("CARGO_BIN_EXE_mips-sim"))
            .args(extra)
            .arg(&program)
            .arg(&memory)
            .output()
            .unwrap();
        let out = String::from_utf8(res.stdout).unwrap();
        out.lines().next().unwrap().trim_start_matches("Cycles: ").parse::<u64>().unwrap()
    };
    assert!(cycles(&["--forwarding"]) < cycles(&[]));
}

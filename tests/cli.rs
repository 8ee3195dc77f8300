use std::path::PathBuf;
use std::process::Command;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mips-asm-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn run(input: &PathBuf, output: &PathBuf) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mips-asm"))
        .arg(input)
        .arg(output)
        .output()
        .unwrap()
}

#[test]
fn writes_truncated_output_and_reports_diagnostic() {
    let input = scratch("trunc.s");
    let output = scratch("trunc.out");
    std::fs::write(&input, "add $t0,$t1,$t2\nfoo bar\nsub $t1,$t2,$t3\n").unwrap();

    let res = run(&input, &output);
    assert!(res.status.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "19546144\n");
    assert!(String::from_utf8_lossy(&res.stderr).contains("invalid instruction `foo`"));
}

#[test]
fn fatal_error_leaves_no_output_file() {
    let input = scratch("fatal.s");
    let output = scratch("fatal.out");
    let _ = std::fs::remove_file(&output);
    std::fs::write(&input, "add $t0,$t1,$t2\nadd $t0,$t1,$nope\n").unwrap();

    let res = run(&input, &output);
    assert!(!res.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("line 2: unknown register `$nope`"));
    assert_eq!(stderr.matches("unknown register").count(), 1);
}

#[test]
fn diagnostics_before_a_fatal_line_are_still_reported() {
    let input = scratch("diag-then-fatal.s");
    let output = scratch("diag-then-fatal.out");
    let _ = std::fs::remove_file(&output);
    std::fs::write(&input, "add $t0 $t1 $t2\nfoo bar\nadd $t0 $t1 $bad\n").unwrap();

    let res = run(&input, &output);
    assert!(!res.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&res.stderr);
    assert!(stderr.contains("line 2: invalid instruction `foo`"));
    assert!(stderr.contains("line 3: unknown register `$bad`"));
}

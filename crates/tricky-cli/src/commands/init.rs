//! The `tricky init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("tricky.toml").exists() {
        println!("tricky.toml already exists, skipping.");
    } else {
        std::fs::write("tricky.toml", SAMPLE_CONFIG)?;
        println!("Created tricky.toml");
    }

    std::fs::create_dir_all("questions")?;
    let bank_path = std::path::Path::new("questions/traffic.toml");
    if bank_path.exists() {
        println!("questions/traffic.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, EXAMPLE_BANK)?;
        println!("Created questions/traffic.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: tricky validate");
    println!("  2. Run: tricky start --user <name>");
    println!("  3. Run: tricky submit --user <name> --answer <id>=<choice> ...");
    println!("  4. Run: tricky score --user <name>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tricky configuration

bank = "questions"
quiz_size = 5

[store]
type = "json"
path = ".tricky/records.json"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "traffic"
name = "Tricky Traffic"
description = "Road signs and right-of-way basics"

[[questions]]
id = "stop-shape"
prompt = "What shape is a stop sign?"
choices = ["Octagon", "Triangle", "Circle", "Diamond"]
correct = "Octagon"

[[questions]]
id = "yield-shape"
prompt = "What shape is a yield sign?"
choices = ["Octagon", "Triangle", "Square", "Pentagon"]
correct = "Triangle"

[[questions]]
id = "amber-light"
prompt = "A steady amber light means:"
choices = ["Speed up", "Stop if it is safe to do so", "Go straight only", "Pedestrians only"]
correct = "Stop if it is safe to do so"

[[questions]]
id = "four-way-stop"
prompt = "Two cars reach a four-way stop at the same time. Who goes first?"
choices = ["The car on the left", "The car on the right", "The larger vehicle", "Whoever honks"]
correct = "The car on the right"

[[questions]]
id = "school-zone"
prompt = "What shape is a school zone warning sign?"
choices = ["Pentagon", "Circle", "Octagon", "Rectangle"]
correct = "Pentagon"

[[questions]]
id = "flashing-red"
prompt = "A flashing red signal should be treated like:"
choices = ["A yield sign", "A green light", "A stop sign", "A railroad crossing"]
correct = "A stop sign"

[[questions]]
id = "solid-yellow"
prompt = "A solid yellow line on your side of the centre means:"
choices = ["Passing allowed", "No passing", "Bus lane", "Road ends"]
correct = "No passing"
"#;

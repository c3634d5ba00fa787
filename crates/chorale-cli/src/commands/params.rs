//! Parameter listing command.

use chorale_core::params::DESCRIPTORS;

pub fn run() -> anyhow::Result<()> {
    println!("Chorus Parameters");
    println!("=================");
    println!();
    println!(
        "  {:12}  {:14}  {:4}  {:12}  {}",
        "ID", "Name", "#", "Default", "Range"
    );
    println!(
        "  {:12}  {:14}  {:4}  {:12}  {}",
        "--", "----", "-", "-------", "-----"
    );

    for desc in &DESCRIPTORS {
        let suffix = desc.unit.suffix();
        let default = format!("{}{suffix}", desc.default);
        println!(
            "  {:12}  {:14}  {:4}  {:12}  {} to {}{}",
            desc.string_id,
            desc.name,
            desc.id.0,
            default,
            desc.min,
            desc.max,
            suffix
        );
    }

    println!();
    println!("Example usage:");
    println!();
    println!("  chorale process in.wav out.wav --rate 0.8 --depth 0.3 --centre-delay 12 --mix 0.5");
    println!("  chorale process in.wav out.wav --preset flange --param feedback=-0.6");

    Ok(())
}

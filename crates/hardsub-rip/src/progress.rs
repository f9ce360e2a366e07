use indicatif::{ProgressBar, ProgressStyle};

fn phase_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:<32} {bar:40.cyan/blue} {percent:>3}% {pos}/{len} {msg}",
    )
    .expect("invalid phase bar template")
}

fn phase_spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:<32} {spinner:.cyan.bold} {pos} {msg}")
        .expect("invalid phase spinner template")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}

pub fn phase_bar(prefix: &'static str, total: u64, unit: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(phase_bar_style());
    bar.set_prefix(prefix);
    bar.set_message(unit);
    bar
}

pub fn phase_spinner(prefix: &'static str, unit: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(phase_spinner_style());
    bar.set_prefix(prefix);
    bar.set_message(unit);
    bar
}

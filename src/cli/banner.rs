//! ASCII art banner for `veil init`.

use std::io::IsTerminal;

/// ANSI true-color escape sequences for the banner palette.
struct Colors {
    veil: &'static str,
    lock: &'static str,
    title: &'static str,
    subtitle: &'static str,
    reset: &'static str,
}

const COLOR: Colors = Colors {
    veil: "\x1b[38;2;120;110;160m",     // Dusky violet
    lock: "\x1b[38;2;218;165;32m",      // Goldenrod
    title: "\x1b[1;38;2;170;150;220m",  // Bold lavender
    subtitle: "\x1b[38;2;120;120;140m", // Gray-blue
    reset: "\x1b[0m",
};

const PLAIN: Colors = Colors {
    veil: "",
    lock: "",
    title: "",
    subtitle: "",
    reset: "",
};

/// Prints the veil banner to stdout.
///
/// Renders ANSI true-color when stdout is a terminal and `NO_COLOR` is
/// unset, plain text otherwise.
pub fn print_banner() {
    let c = if std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        &COLOR
    } else {
        &PLAIN
    };

    let vl = c.veil;
    let lk = c.lock;
    let tt = c.title;
    let st = c.subtitle;
    let r = c.reset;

    println!(
        r#"
{vl}  ░▒▓▓▓▓▓▓▓▓▓▓▒░{r}
{vl} ░▒▓{lk}  ┌────┐  {vl}▓▒░{r}     {tt}__   __ ___  ___  _    {r}
{vl}░▒▓{lk}   │ ◉◉ │   {vl}▓▒░{r}    {tt}\ \ / /| __||_ _|| |   {r}
{vl}░▒▓{lk}  ┌┴────┴┐  {vl}▓▒░{r}    {tt} \ V / | _|  | | | |__ {r}
{vl}░▒▓{lk}  │  ▄▄  │  {vl}▓▒░{r}    {tt}  \_/  |___||___||____|{r}
{vl} ░▒▓{lk} └──────┘ {vl}▓▒░{r}
{vl}  ░▒▓▓▓▓▓▓▓▓▓▒░{r}        {st}"What's behind the veil stays there."{r}
"#
    );
}

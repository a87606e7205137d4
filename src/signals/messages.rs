/*!
 * Signal Messages
 * Banners and the text printed before a fatal exit
 *
 * Everything here is `&'static str` so the handler can write it without
 * allocating.
 */

use super::types::FatalSignal;

macro_rules! banner {
    (ERROR) => {
        "\x1b[37;41m ERROR \x1b[0m "
    };
    (HINT) => {
        "\x1b[37;46m HINT \x1b[0m "
    };
}

pub const ERROR_BANNER: &str = banner!(ERROR);
pub const HINT_BANNER: &str = banner!(HINT);

/// Documentation pointers printed after every fatal signal
pub const SIGNAL_HELP: &str = concat!(
    "\n",
    banner!(HINT),
    "Online docs for signal errors:\n",
    " \x1b[2m·\x1b[0m Wikipedia: \x1b[0;4;34mhttps://en.wikipedia.org/wiki/Signal_(IPC)#POSIX_signals\x1b[0m\n",
    " \x1b[2m·\x1b[0m GNU: \x1b[0;4;34mhttps://www.gnu.org/software/libc/manual/html_node/Standard-Signals.html\x1b[0m\n",
    " \x1b[2m·\x1b[0m Linux Man: \x1b[0;4;34mhttps://man7.org/linux/man-pages/man7/signal.7.html\x1b[0m\n",
);

/// What happened and the usual cause, as printed under the error banner
pub fn explanation(signal: FatalSignal) -> &'static str {
    match signal {
        FatalSignal::SIGHUP => "\x1b[31mHangup signal received. \x1b[2mThe terminal that started the process was closed or disconnected.\x1b[0m\n",
        FatalSignal::SIGINT => "\x1b[31mInteractive attention signal received. \x1b[2mCtrl+C was pressed in the terminal running the process.\x1b[0m\n",
        FatalSignal::SIGQUIT => "\x1b[31mQuit signal received. \x1b[2mCtrl+\\ was pressed in the terminal running the process.\x1b[0m\n",
        FatalSignal::SIGILL => "\x1b[31mIllegal instruction signal received. \x1b[2mThe process tried to execute an invalid or undefined instruction.\x1b[0m\n",
        FatalSignal::SIGTRAP => "\x1b[31mTrace/breakpoint trap signal received. \x1b[2mThe process hit a breakpoint set by a debugger.\x1b[0m\n",
        FatalSignal::SIGABRT => "\x1b[31mAbnormal termination signal received. \x1b[2mThe process aborted after an unrecoverable error.\x1b[0m\n",
        FatalSignal::SIGFPE => "\x1b[31mErroneous arithmetic operation signal received. \x1b[2mThe process performed an invalid arithmetic operation.\x1b[0m\n",
        FatalSignal::SIGSEGV => "\x1b[31mInvalid access to storage signal received. \x1b[2mThe process touched memory it is not allowed to access.\x1b[0m\n",
        FatalSignal::SIGPIPE => "\x1b[31mBroken pipe signal received. \x1b[2mThe process wrote to a pipe whose reading end is closed.\x1b[0m\n",
        FatalSignal::SIGALRM => "\x1b[31mAlarm clock signal received. \x1b[2mA timer set by the process expired.\x1b[0m\n",
        FatalSignal::SIGTERM => "\x1b[31mTermination request signal received. \x1b[2mThe process was asked to terminate cleanly.\x1b[0m\n",
    }
}

/// Pieces of the fatal-signal report, in output order
pub fn report_parts(signal: FatalSignal) -> [&'static str; 4] {
    ["\n", ERROR_BANNER, explanation(signal), SIGNAL_HELP]
}

/// Full report text for `signal`, as the handler prints it
pub fn render_report(signal: FatalSignal) -> String {
    report_parts(signal).concat()
}

use std::path::PathBuf;
use style_lens::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        templates_dir: args
            .opt_value_from_str::<_, PathBuf>("--templates-dir")
            .unwrap_or(None),
        model_dir: args
            .opt_value_from_str::<_, PathBuf>("--model-dir")
            .unwrap_or(None),
        camera_index: args.opt_value_from_str("--camera").unwrap_or(None),
    };

    app::run(flags)
}

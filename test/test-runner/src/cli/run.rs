use crate::runner::{self, Runner};

#[derive(clap::Args)]
pub struct Args {
    /// Only run cases whose suite or case name contains this substring
    #[clap(long)]
    filter: Option<String>,
    /// Overwrite every `.expected` golden file with the actual output of a
    /// failing case, instead of reporting the mismatch
    #[clap(long)]
    update_expected: bool,
}

pub fn exec(cmd: Args) {
    let runner = Runner::load(crate::TEST_SUITES_PATH);
    let config = runner::Args { filter: cmd.filter };
    let res = runner.run(&config);

    if cmd.update_expected {
        res.update_expected();
        println!("Updated expected outputs.");
    } else {
        res.print();
    }

    if !res.success() {
        std::process::exit(1);
    }
}

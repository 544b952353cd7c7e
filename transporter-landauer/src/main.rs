use transporter_landauer::app::run;

fn main() -> color_eyre::Result<()> {
    run()
}

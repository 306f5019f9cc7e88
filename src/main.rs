fn main() -> anyhow::Result<()> {
    hok_viz_lib::run()
}

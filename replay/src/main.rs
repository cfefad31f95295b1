fn main() -> anyhow::Result<()> {
    replay::main()
}

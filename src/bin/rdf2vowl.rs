fn main() -> rdf2vowl::Result<()> {
    rdf2vowl::cli::main()
}

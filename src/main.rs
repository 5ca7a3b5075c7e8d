fn main() {
    mansi_translator_lib::run()
}

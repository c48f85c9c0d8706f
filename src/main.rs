fn main() -> eframe::Result<()> {
    fourier_paint::run(fourier_paint::PaintConfig::default())
}

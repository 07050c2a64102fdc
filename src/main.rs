use std::cell::Cell;
use std::rc::Rc;
use std::{env, error::Error, fs, fs::File, path::PathBuf};

use sms::vdp::{Vdp, REG0_MODE4, REG1_DISPLAY_ON, REG1_FRAME_IRQ};
use sms::{state, InterruptSink};

/// Sink that tallies interrupt requests for the end-of-run report.
#[derive(Clone, Default)]
struct IntTally(Rc<Cell<u64>>);

impl InterruptSink for IntTally {
    fn request_int(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut game_gear = false;
    let mut pal = false;
    let mut frames = 60usize;
    let mut dump_path: Option<PathBuf> = None;
    let mut state_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--gg" => game_gear = true,
            "--pal" => pal = true,
            "--frames" => {
                if let Some(value) = args.next() {
                    match value.parse::<usize>() {
                        Ok(count) => frames = count,
                        Err(_) => {
                            eprintln!("invalid --frames value: {value}");
                            return Ok(());
                        }
                    }
                } else {
                    eprintln!("--frames requires a value");
                    return Ok(());
                }
            }
            "--dump" => {
                if let Some(path) = args.next() {
                    dump_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("--dump requires a file path");
                    return Ok(());
                }
            }
            "--save-state" => {
                if let Some(path) = args.next() {
                    state_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("--save-state requires a file path");
                    return Ok(());
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                return Ok(());
            }
        }
    }

    let tally = IntTally::default();
    let interrupts = tally.0.clone();
    let mut vdp = Vdp::with_sink(Box::new(tally));
    vdp.reset(game_gear, pal);
    program_test_scene(&mut vdp, game_gear);

    let (width, height) = vdp.frame_dimensions();
    let mut frame = vec![0u32; width * height];

    let mut completed = 0usize;
    let mut cycles = 0u32;
    while completed < frames {
        // Feed cycles in line-sized slices, the way a CPU core would hand
        // over its per-instruction budget; tick keeps any overshoot.
        cycles += 228;
        if vdp.tick(&mut cycles, &mut frame) {
            completed += 1;
            // Pan the background one dot per frame to keep the ports warm.
            set_register(&mut vdp, 8, completed as u8);
        }
    }

    println!(
        "{} {} frame(s) at {}x{}: {} cycles/frame, {} interrupt(s) serviced",
        if pal { "PAL" } else { "NTSC" },
        completed,
        width,
        height,
        vdp.cycles_per_frame(),
        interrupts.get(),
    );

    if let Some(path) = dump_path {
        write_ppm(&path, width, height, &frame)?;
        println!("frame written to {}", path.display());
    }

    if let Some(path) = state_path {
        let mut file = File::create(&path)?;
        state::save_state(&vdp, &mut file)?;
        println!("state written to {}", path.display());
    }

    Ok(())
}

fn set_register(vdp: &mut Vdp, index: u8, value: u8) {
    vdp.write_control(value);
    vdp.write_control(0x80 | index);
}

fn set_address(vdp: &mut Vdp, address: u16, code: u8) {
    vdp.write_control((address & 0x00FF) as u8);
    vdp.write_control((((address >> 8) as u8) & 0x3F) | (code << 6));
}

/// Upload a palette, two tiles, a name table, and a sprite row through the
/// public ports, leaving a scene the raster engines can chew on.
fn program_test_scene(vdp: &mut Vdp, game_gear: bool) {
    // Palette gradient; the sprite half mirrors the background half.
    set_address(vdp, 0x0000, 0x03);
    for entry in 0..32u8 {
        let bits = (entry ^ (entry << 3)) & 0x3F;
        if game_gear {
            let wide = |channel: u8| channel * 5;
            vdp.write_data(wide((bits >> 2) & 0x03) << 4 | wide(bits & 0x03));
            vdp.write_data(wide((bits >> 4) & 0x03));
        } else {
            vdp.write_data(bits);
        }
    }

    // Tile 1: checkerboard on plane 0. Tile 2: box outline on plane 1.
    set_address(vdp, 0x0020, 0x01);
    for row in 0..8 {
        let checker = if row & 1 == 0 { 0xAA } else { 0x55 };
        vdp.write_data(checker);
        vdp.write_data(0x00);
        vdp.write_data(0x00);
        vdp.write_data(0x00);
    }
    for row in 0..8 {
        let outline = if row == 0 || row == 7 { 0xFF } else { 0x81 };
        vdp.write_data(0x00);
        vdp.write_data(outline);
        vdp.write_data(0x00);
        vdp.write_data(0x00);
    }

    // Name table at 0x3800, alternating tiles.
    set_address(vdp, 0x3800, 0x01);
    for row in 0..28u16 {
        for column in 0..32u16 {
            vdp.write_data((1 + ((row + column) & 1)) as u8);
            vdp.write_data(0x00);
        }
    }

    // Four sprites in a row across the middle of the screen.
    set_address(vdp, 0x3F00, 0x01);
    for _ in 0..4 {
        vdp.write_data(88);
    }
    vdp.write_data(0xD0);
    set_address(vdp, 0x3F80, 0x01);
    for sprite in 0..4u8 {
        vdp.write_data(96 + sprite * 16);
        vdp.write_data(0x02);
    }

    set_register(vdp, 0, REG0_MODE4);
    set_register(vdp, 1, REG1_DISPLAY_ON | REG1_FRAME_IRQ);
    set_register(vdp, 2, 0xFF);
    set_register(vdp, 5, 0x7E);
    set_register(vdp, 6, 0x00);
    set_register(vdp, 7, 0x04);
}

fn write_ppm(
    path: &PathBuf,
    width: usize,
    height: usize,
    frame: &[u32],
) -> Result<(), Box<dyn Error>> {
    let mut data = Vec::with_capacity(width * height * 3 + 32);
    data.extend_from_slice(format!("P6\n{width} {height}\n255\n").as_bytes());
    for pixel in &frame[..width * height] {
        data.push((pixel >> 16) as u8);
        data.push((pixel >> 8) as u8);
        data.push(*pixel as u8);
    }
    fs::write(path, data)?;
    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: sms [--gg] [--pal] [--frames <n>] [--dump <file.ppm>] [--save-state <file>]"
    );
    eprintln!("  --gg                Game Gear timing, palette, and 160x144 crop");
    eprintln!("  --pal               313-line PAL frame cadence");
    eprintln!("  --frames <n>        Number of frames to run (default 60)");
    eprintln!("  --dump <file.ppm>   Write the final frame as a binary PPM");
    eprintln!("  --save-state <f>    Write the chip state after the run");
    eprintln!();
    eprintln!("Runs a built-in test scene through the VDP ports; no ROM needed.");
}

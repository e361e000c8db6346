//! Integration tests for picfx crates.
//!
//! End-to-end checks of filter properties across `picfx-core`, `picfx-ops`
//! and `picfx-io`.

#[cfg(test)]
mod tests {
    use picfx_core::{PixelBuffer, Rgba};
    use picfx_ops::color_ops::{gray_scale, mirror_vertical, negate};
    use picfx_ops::edge::edge_detection;
    use picfx_ops::neighborhood::{
        Boundary, blur, blur_with, enhance, enhance_unclamped, pixelate,
    };
    use picfx_ops::remap::{stair_step, swap_left_right, wavy};
    use picfx_ops::{Filter, apply_all};
    use tempfile::tempdir;

    /// Pseudo-random but deterministic pixels.
    fn noisy(h: u32, w: u32) -> PixelBuffer {
        let mut state = 0x2545_f491u32;
        let px = (0..h * w)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                Rgba::from_array(state.to_le_bytes())
            })
            .collect();
        PixelBuffer::from_pixels(h, w, px).unwrap()
    }

    /// 4x4 grid where every pixel has a different color.
    fn distinct_4x4() -> PixelBuffer {
        let px = (0..4u8)
            .flat_map(|r| (0..4u8).map(move |c| Rgba::new(r * 60, c * 60, r * 16 + c, 255)))
            .collect();
        PixelBuffer::from_pixels(4, 4, px).unwrap()
    }

    /// Filter list in the one-key-map YAML form recipes use.
    fn steps_from_yaml(yaml: &str) -> Vec<Filter> {
        let de = serde_yaml::Deserializer::from_str(yaml);
        serde_yaml::with::singleton_map_recursive::deserialize(de).unwrap()
    }

    #[test]
    fn test_double_negate_is_identity() {
        let buf = noisy(17, 23);
        let mut out = buf.clone();
        negate(&mut out);
        assert_ne!(out, buf);
        negate(&mut out);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_swap_left_right_is_involution_for_even_width() {
        let buf = noisy(9, 12);
        assert_eq!(swap_left_right(&swap_left_right(&buf)), buf);
    }

    #[test]
    fn test_gray_scale_is_fixed_point() {
        let mut once = noisy(11, 7);
        gray_scale(&mut once);
        let mut twice = once.clone();
        gray_scale(&mut twice);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_second_mirror_vertical_is_noop() {
        for width in [6, 7] {
            let mut once = noisy(5, width);
            mirror_vertical(&mut once);
            let mut twice = once.clone();
            mirror_vertical(&mut twice);
            assert_eq!(twice, once, "width {width}");
        }
    }

    #[test]
    fn test_blur_size_one_is_identity() {
        let buf = noisy(13, 8);
        assert_eq!(blur(&buf, 1).unwrap(), buf);
        assert_eq!(blur_with(&buf, 1, Boundary::Replicate).unwrap(), buf);
    }

    #[test]
    fn test_pixelate_large_size_gives_global_mean() {
        let buf = noisy(6, 9);
        let n = buf.pixels().len() as u64;
        let mut sums = [0u64; 4];
        for px in buf.pixels() {
            for (s, v) in sums.iter_mut().zip(px.to_array()) {
                *s += u64::from(v);
            }
        }
        let mean = Rgba::from_array(sums.map(|s| (s / n) as u8));

        for size in [9, 10, 1000] {
            let mut out = buf.clone();
            pixelate(&mut out, size).unwrap();
            assert!(out.pixels().iter().all(|&px| px == mean), "size {size}");
        }
    }

    #[test]
    fn test_wavy_zero_is_identity() {
        let buf = distinct_4x4();
        assert_eq!(wavy(&buf, 0), buf);
    }

    #[test]
    fn test_stair_step_shifts_each_row_one_more() {
        let buf = distinct_4x4();
        let out = stair_step(&buf, 1, 4).unwrap();
        for row in 0..4u32 {
            for col in 0..4u32 {
                let dest = (col + row) % 4;
                assert_eq!(
                    out.get(row, dest).unwrap(),
                    buf.get(row, col).unwrap(),
                    "row {row} col {col}"
                );
            }
        }
    }

    #[test]
    fn test_edge_detection_single_row() {
        let row = vec![Rgba::BLACK, Rgba::BLACK, Rgba::WHITE];
        let mut buf = PixelBuffer::from_rows(vec![row]).unwrap();
        edge_detection(&mut buf, 10.0);
        assert_eq!(buf.row(0), &[Rgba::WHITE, Rgba::BLACK, Rgba::WHITE]);
    }

    #[test]
    fn test_enhance_is_clamped_unclamped() {
        let buf = noisy(8, 8);
        let raw = enhance_unclamped(&buf, 3).unwrap();
        assert!(raw.out_of_range_count() > 0);
        assert_eq!(enhance(&buf, 3).unwrap(), raw.to_clamped().unwrap());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let buf = noisy(3, 3);
        let err = buf.get(3, 0).unwrap_err();
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_io_roundtrip_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noisy.png");
        let buf = noisy(32, 20);

        picfx_io::save_buffer(&buf, &path).expect("Failed to write PNG");
        let loaded = picfx_io::load_buffer(&path).expect("Failed to read PNG");
        assert_eq!(loaded, buf);
    }

    #[test]
    fn test_io_roundtrip_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flat.jpg");
        let buf = PixelBuffer::filled(24, 40, Rgba::new(120, 60, 200, 10)).unwrap();

        picfx_io::save_buffer(&buf, &path).expect("Failed to write JPEG");
        let loaded = picfx_io::load_buffer(&path).expect("Failed to read JPEG");
        assert_eq!(loaded.dimensions(), (24, 40));
        let px = loaded.get(12, 20).unwrap();
        assert_eq!(px.a, 255);
        assert!(px.distance(&Rgba::opaque(120, 60, 200)) < 12.0, "{px}");
    }

    #[test]
    fn test_magic_bytes_beat_extension() {
        let dir = tempdir().unwrap();
        let png_path = dir.path().join("real.png");
        let lying = dir.path().join("real.jpg");
        let buf = noisy(4, 4);
        picfx_io::save_buffer(&buf, &png_path).unwrap();
        std::fs::rename(&png_path, &lying).unwrap();

        assert_eq!(picfx_io::Format::detect(&lying).unwrap(), picfx_io::Format::Png);
        assert_eq!(picfx_io::load_buffer(&lying).unwrap(), buf);
    }

    #[test]
    fn test_io_errors() {
        let dir = tempdir().unwrap();
        let buf = noisy(2, 2);
        assert!(matches!(
            picfx_io::save_buffer(&buf, dir.path().join("x.gif")),
            Err(picfx_io::IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            picfx_io::load_buffer(dir.path().join("missing.png")),
            Err(picfx_io::IoError::Io(_))
        ));
    }

    #[test]
    fn test_recipe_pipeline_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let buf = noisy(30, 30);
        picfx_io::save_buffer(&buf, &input).unwrap();

        let steps = steps_from_yaml(
            "- blur: { size: 5 }\n- negate\n- stair_step: { shift_count: 10, steps: 10 }\n",
        );
        let loaded = picfx_io::load_buffer(&input).unwrap();
        let out = apply_all(&loaded, &steps).unwrap();
        picfx_io::save_buffer(&out, &output).unwrap();

        let mut expected = blur(&buf, 5).unwrap();
        negate(&mut expected);
        let expected = stair_step(&expected, 10, 10).unwrap();
        assert_eq!(picfx_io::load_buffer(&output).unwrap(), expected);
    }

    #[test]
    fn test_catalog_specs_match_functions() {
        let buf = noisy(10, 10);
        let steps: Vec<Filter> = ["swap-left-right", "wavy=3"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let via_spec = apply_all(&buf, &steps).unwrap();
        assert_eq!(via_spec, wavy(&swap_left_right(&buf), 3));
    }
}

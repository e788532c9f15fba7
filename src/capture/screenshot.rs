//! Screenshot of the whole virtual desktop using GDI.

use anyhow::Result;
use image::RgbaImage;

/// A frozen copy of the desktop.
pub struct ScreenCapture {
    pub image: RgbaImage,
}

/// Marks the process DPI aware so GDI works in physical pixels.
#[cfg(windows)]
pub fn enable_dpi_awareness() {
    use windows::Win32::UI::WindowsAndMessaging::SetProcessDPIAware;

    let ok = unsafe { SetProcessDPIAware() };
    if !ok.as_bool() {
        crate::log("SetProcessDPIAware failed; captures may be scaled");
    }
}

#[cfg(not(windows))]
pub fn enable_dpi_awareness() {}

/// Captures every monitor into one RGBA image.
///
/// This function:
/// 1. Reads the virtual screen bounds
/// 2. Copies the screen DC into a compatible bitmap (BitBlt)
/// 3. Reads the bitmap back as top-down 32-bit BGRA
/// 4. Converts BGRA to RGBA with opaque alpha
#[cfg(windows)]
pub fn capture_virtual_screen() -> Result<ScreenCapture> {
    use anyhow::{anyhow, Context};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Gdi::{
        BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
        GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
        DIB_RGB_COLORS, SRCCOPY,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN,
        SM_YVIRTUALSCREEN,
    };

    let (left, top, width, height) = unsafe {
        (
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    };
    if width <= 0 || height <= 0 {
        return Err(anyhow!("Invalid virtual screen size {}x{}", width, height));
    }
    crate::log(&format!(
        "Capturing virtual screen {}x{} at ({}, {})",
        width, height, left, top
    ));

    let desktop = HWND(std::ptr::null_mut());
    let mut bgra = vec![0u8; width as usize * height as usize * 4];

    let copied = unsafe {
        let screen_dc = GetDC(desktop);
        if screen_dc.is_invalid() {
            return Err(anyhow!("GetDC failed"));
        }
        let mem_dc = CreateCompatibleDC(screen_dc);
        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        let previous = SelectObject(mem_dc, bitmap);

        let blt = BitBlt(mem_dc, 0, 0, width, height, screen_dc, left, top, SRCCOPY)
            .context("BitBlt failed");

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                // Negative height = top-down rows
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        // The bitmap must not be selected into a DC while reading it back
        let _ = SelectObject(mem_dc, previous);
        let lines = if blt.is_ok() {
            GetDIBits(
                mem_dc,
                bitmap,
                0,
                height as u32,
                Some(bgra.as_mut_ptr() as *mut std::ffi::c_void),
                &mut info,
                DIB_RGB_COLORS,
            )
        } else {
            0
        };

        let _ = DeleteObject(bitmap);
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(desktop, screen_dc);

        blt.map(|()| lines)
    }?;

    if copied != height {
        return Err(anyhow!("GetDIBits copied {} of {} lines", copied, height));
    }

    // BGRA -> RGBA
    for px in bgra.chunks_exact_mut(4) {
        px.swap(0, 2);
        px[3] = 255;
    }

    let image = RgbaImage::from_raw(width as u32, height as u32, bgra)
        .ok_or_else(|| anyhow!("Pixel buffer size mismatch"))?;

    Ok(ScreenCapture { image })
}

#[cfg(not(windows))]
pub fn capture_virtual_screen() -> Result<ScreenCapture> {
    Err(anyhow::anyhow!("Screen capture is only supported on Windows"))
}

#![no_std]
#![no_main]
#![feature(alloc_error_handler)]
#![feature(const_mut_refs)]

use core::panic::PanicInfo;

use talc::*;

static mut ARENA: [u8; 10000] = [0; 10000];

#[global_allocator]
static ALLOCATOR: Talck<spin::Mutex<()>, ClaimOnOom> =
    Talc::new(unsafe { ClaimOnOom::new(Span::from_const_array(core::ptr::addr_of!(ARENA))) })
        .lock();

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

#[alloc_error_handler]
fn alloc_error_handler(layout: core::alloc::Layout) -> ! {
    panic!("Can't handle allocation: layout = {:?}", layout);
}

#[no_mangle]
pub extern "C" fn _start() -> ! {
    use qarith::{
        continued_fraction::{continued_fraction_convergent, Fraction},
        discretize::{discretize, Precision},
        rational::{exp_mod, inverse_mod},
    };

    assert_eq!(exp_mod(2i64, 10, 1000), Ok(24));
    assert_eq!(inverse_mod(3i64, 7), Ok(5));

    let convergent =
        continued_fraction_convergent(Fraction::new(314159i64, 100000), 113).unwrap();
    assert_eq!(convergent.denominator().abs(), 113);

    let histogram = discretize(Precision::new(2).unwrap(), &[1.0, 1.0, 1.0, 1.0]).unwrap();
    let histogram = core::hint::black_box(histogram);
    assert_eq!(histogram.keep_coefficients(), [3, 3, 3, 3]);

    loop {}
}

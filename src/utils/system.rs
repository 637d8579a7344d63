/// Resident set size of the current process in gigabytes, when the platform
/// exposes it.
#[inline]
pub fn current_rss_gb() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        linux_rss_gb()
    }

    #[cfg(target_os = "macos")]
    {
        macos_rss_gb()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

#[cfg(target_os = "linux")]
fn linux_rss_gb() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    vm_rss_gb_from_status(&status)
}

#[cfg(target_os = "linux")]
fn vm_rss_gb_from_status(status: &str) -> Option<f64> {
    let rest = status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))?;
    let kb: u64 = rest
        .split_whitespace()
        .find_map(|token| token.parse().ok())?;
    Some(kb as f64 / (1024.0 * 1024.0))
}

#[cfg(target_os = "macos")]
fn macos_rss_gb() -> Option<f64> {
    use libc::{c_int, c_void, kern_return_t, mach_msg_type_number_t, mach_port_t, time_value_t};
    use std::mem::{size_of, zeroed};

    #[repr(C)]
    #[allow(non_camel_case_types)]
    struct mach_task_basic_info {
        virtual_size: u64,
        resident_size: u64,
        resident_size_max: u64,
        user_time: time_value_t,
        system_time: time_value_t,
        policy: i32,
        suspend_count: i32,
    }

    unsafe extern "C" {
        fn mach_task_self() -> mach_port_t;
        fn task_info(
            target_task: mach_port_t,
            flavor: c_int,
            task_info_out: *mut c_void,
            task_info_out_count: *mut mach_msg_type_number_t,
        ) -> kern_return_t;
    }

    const MACH_TASK_BASIC_INFO: c_int = 20;
    const MACH_TASK_BASIC_INFO_COUNT: mach_msg_type_number_t =
        (size_of::<mach_task_basic_info>() / size_of::<u32>()) as _;

    unsafe {
        let mut info: mach_task_basic_info = zeroed();
        let mut count = MACH_TASK_BASIC_INFO_COUNT;
        let kr = task_info(
            mach_task_self(),
            MACH_TASK_BASIC_INFO,
            &mut info as *mut _ as *mut c_void,
            &mut count,
        );
        if kr == 0 {
            return Some(info.resident_size as f64 / (1024.0 * 1024.0 * 1024.0));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    #[cfg(target_os = "linux")]
    mod linux {
        use super::super::{current_rss_gb, vm_rss_gb_from_status};

        #[test]
        fn parses_vmrss_line() {
            let s = "Name:\tproc\nVmSize:\t  999 kB\nVmRSS:\t  123456 kB\nThreads: 4\n";
            let got = vm_rss_gb_from_status(s).unwrap();
            let want = 123456.0 / (1024.0 * 1024.0);
            assert!((got - want).abs() < 1e-12, "got={got}, want={want}");
        }

        #[test]
        fn skips_non_numeric_tokens() {
            let got = vm_rss_gb_from_status("VmRSS:\t  abc  789  kB").unwrap();
            assert!((got - 789.0 / (1024.0 * 1024.0)).abs() < 1e-12);
        }

        #[test]
        fn none_without_vmrss_line() {
            assert!(vm_rss_gb_from_status("Name:\tfoo\nVmSize:\t 1024 kB\n").is_none());
        }

        #[test]
        fn none_without_a_number() {
            assert!(vm_rss_gb_from_status("VmRSS:\t kB").is_none());
        }

        #[test]
        fn smoke_current_rss_non_negative() {
            let v = current_rss_gb();
            assert!(v.is_some());
            assert!(v.unwrap() >= 0.0);
        }
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn macos_current_rss_smoke() {
        let v = super::current_rss_gb();
        assert!(v.is_some(), "expected Some on macOS");
        let x = v.unwrap();
        assert!(x.is_finite() && x >= 0.0, "invalid RSS value: {x}");
    }
}

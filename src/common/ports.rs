use crate::error::{Result, ScanError};

/// 解析端口参数，例如 "22,80,8000-8100"
///
/// 按输入顺序展开，不去重：重叠的范围会产生重复端口。
/// 起始端口大于结束端口的范围视为错误。
pub fn parse_ports(ports_str: &str) -> Result<Vec<u16>> {
    let mut ports = Vec::new();

    for part in ports_str.split(',') {
        let part = part.trim();

        if part.contains('-') {
            // 端口范围 (e.g., 80-100)
            let range: Vec<&str> = part.split('-').collect();
            if range.len() != 2 {
                return Err(ScanError::parse(part));
            }

            let start = parse_port(range[0])?;
            let end = parse_port(range[1])?;

            if start > end {
                return Err(ScanError::parse(part));
            }
            ports.extend(start..=end);
        } else {
            // 单个端口
            ports.push(parse_port(part)?);
        }
    }

    Ok(ports)
}

fn parse_port(token: &str) -> Result<u16> {
    let token = token.trim();
    token.parse::<u16>().map_err(|_| ScanError::parse(token))
}

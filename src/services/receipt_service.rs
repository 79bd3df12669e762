// src/services/receipt_service.rs

use genpdf::{Element, elements, style};
use image::Luma;
use qrcode::QrCode;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::PaymentMethod,
    services::sale_service::SaleService,
};

// Gera o recibo da venda em PDF para impressão no balcão.
#[derive(Clone)]
pub struct ReceiptService {
    sale_service: SaleService,
    pharmacy_name: String,
}

impl ReceiptService {
    pub fn new(sale_service: SaleService, pharmacy_name: String) -> Self {
        Self {
            sale_service,
            pharmacy_name,
        }
    }

    pub async fn generate_receipt_pdf<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<Vec<u8>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // 1. Busca os Dados
        let detail = self.sale_service.get_sale_detail(executor, sale_id).await?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Recibo {}", detail.header.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(self.pharmacy_name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new(format!("RECIBO DE VENDA {}", detail.header.id))
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Data: {}",
            detail.header.created_at.format("%d/%m/%Y %H:%M")
        )));
        doc.push(elements::Paragraph::new(format!(
            "Operador: {}",
            detail.cashier_email
        )));

        match &detail.customer_name {
            Some(name) => doc.push(elements::Paragraph::new(format!("Cliente: {}", name))),
            None => doc.push(elements::Paragraph::new("Cliente: Consumidor Final")),
        }

        doc.push(elements::Paragraph::new(format!(
            "Pagamento: {}",
            payment_method_label(detail.header.payment_method)
        )));

        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Nome (4), Qtd (1), Preço (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Medicamento").styled(style_bold))
            .element(elements::Paragraph::new("Qtd").styled(style_bold))
            .element(elements::Paragraph::new("Unitário").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .expect("Table error");

        for item in &detail.items {
            table
                .row()
                .element(elements::Paragraph::new(item.medicine_name.clone()))
                .element(elements::Paragraph::new(format!("{}", item.quantity)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", item.unit_price)))
                .element(elements::Paragraph::new(format!("R$ {:.2}", item.total_price)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let right = |text: String| {
            let mut p = elements::Paragraph::new(text);
            p.set_alignment(genpdf::Alignment::Right);
            p
        };

        doc.push(right(format!("Subtotal: R$ {:.2}", detail.header.total_amount)));
        doc.push(right(format!("Desconto: {:.2}%", detail.header.discount)));
        doc.push(right(format!("Imposto: {:.2}%", detail.header.tax)));
        doc.push(
            right(format!("TOTAL: R$ {:.2}", detail.header.final_amount))
                .styled(style::Style::new().bold().with_font_size(12)),
        );

        doc.push(elements::Break::new(2));

        // --- QR CODE (conferência do recibo pelo id da venda) ---
        let code = QrCode::new(detail.header.id.to_string().as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- RODAPÉ ---
        doc.push(elements::Break::new(2));
        doc.push(
            elements::Paragraph::new("Obrigado pela preferência!")
                .styled(style::Style::new().italic().with_font_size(8)),
        );

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Dinheiro",
        PaymentMethod::Card => "Cartão",
        PaymentMethod::Digital => "Pagamento Digital",
    }
}
